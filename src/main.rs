//! `rawhttp [GET|POST] URL`
//!
//! Prints the status code of the response and, when it is 200, the body.

use log::error;
use rawhttp::network::application::http::{Client, Method, Options, Response};
use std::process::ExitCode;

fn help() {
    println!("rawhttp [GET/POST] [URL]\n");
}

fn print_response(response: &Response) {
    match response.code {
        Some(code) => println!("{code}"),
        None => println!("None"),
    }
    if response.code == Some(200) {
        println!("{}", response.body);
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (method, url) = match args.as_slice() {
        [] => {
            help();
            return ExitCode::FAILURE;
        }
        [command, url] => (Method::from_command(command), url.as_str()),
        [url, ..] => (Method::Get, url.as_str()),
    };

    let mut client = Client::tcp(Options::from_env());
    match client.command(url, method, None) {
        Ok(response) => {
            print_response(&response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{} {url}: {e}", method.as_str());
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

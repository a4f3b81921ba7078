// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! csrf-relay CLI
//!
//! Inspect CSRF cookies and send requests the way a page script would.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use csrf_relay::{cookie, Page, PageConfig, Request};
use reqwest::Method;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("csrf_relay=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "lookup" => {
            if args.len() < 4 {
                eprintln!("Usage: csrf-relay lookup <name> <cookie-string>");
                return ExitCode::from(1);
            }
            lookup_cookie(&args[2], &args[3])
        }
        "token" => {
            if args.len() < 3 {
                eprintln!("Usage: csrf-relay token <page-url>");
                return ExitCode::from(1);
            }
            report(show_token(&args[2]).await)
        }
        "send" => {
            if args.len() < 4 {
                eprintln!("Usage: csrf-relay send <page-url> <target-url> [body]");
                return ExitCode::from(1);
            }
            let body = args.get(4).cloned().unwrap_or_default();
            report(send_request(&args[2], &args[3], body).await)
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("csrf-relay {}", csrf_relay::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"csrf-relay - send same-origin requests with the page's CSRF token

USAGE:
    csrf-relay <COMMAND> [ARGS]

COMMANDS:
    lookup <name> <cookie-string>            Print the decoded value of one cookie
    token <page-url>                         Load a page and print its CSRF token
    send <page-url> <target-url> [body]      Load a page, then POST to target
    help                                     Show this help message
    version                                  Show version information

ENVIRONMENT:
    RUST_LOG    Log filter (default: csrf_relay=info)

EXAMPLES:
    csrf-relay lookup csrftoken "sessionid=x; csrftoken=abc%20def"
    csrf-relay token https://example.com/accounts/login/
    csrf-relay send https://example.com/app/ /api/items/ "name=widget"
"#
    );
}

fn report(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn lookup_cookie(name: &str, cookies: &str) -> ExitCode {
    match cookie::lookup(name, Some(cookies)) {
        Some(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("No cookie named '{}'", name);
            ExitCode::from(1)
        }
    }
}

async fn show_token(page_url: &str) -> anyhow::Result<()> {
    let page = Page::open(page_url, PageConfig::default())
        .await
        .with_context(|| format!("failed to load {}", page_url))?;

    match page.csrf_token() {
        Some(token) => println!("{}", token),
        None => println!(
            "(no '{}' cookie set by {})",
            page.config().csrf.cookie_name,
            page.url()
        ),
    }
    Ok(())
}

async fn send_request(page_url: &str, target: &str, body: String) -> anyhow::Result<()> {
    let page = Page::open(page_url, PageConfig::default())
        .await
        .with_context(|| format!("failed to load {}", page_url))?;

    let target_url = page.resolve(target).context("invalid target URL")?;
    let mut request = Request::from_url(Method::POST, target_url.clone()).body(body);
    if let Some(origin) = page.client().page_origin() {
        request.classify(origin);
    }

    // Dry run of the hook on a copy; the client repeats it on the real request
    let attached = page
        .csrf_injector()
        .map_or(false, |injector| injector.apply(&mut request.clone()));

    let response = page
        .client()
        .execute(request)
        .await
        .with_context(|| format!("request to {} failed", target_url))?;

    println!("Status: {}", response.status);
    println!("URL: {}", response.url);
    println!(
        "CSRF header: {}",
        if attached { "attached" } else { "not attached" }
    );
    if let Some(content_type) = response.header("content-type") {
        println!("Content-Type: {}", content_type);
    }
    println!("Size: {} bytes", response.body_len());
    println!("Time: {}ms", response.response_time_ms);
    Ok(())
}

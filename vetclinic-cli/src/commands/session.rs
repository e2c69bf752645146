use std::{
    env,
    io::{self, Write},
};

use anyhow::{Context, Result, bail};
use clap::Args;
use rpassword::prompt_password;
use shared::models::{LoginRequest, RegisterRequest};

use super::AppContext;

/// Read instead of prompting when set, for scripted use.
const PASSWORD_ENV: &str = "VETCLINIC_PASSWORD";

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account name
    #[arg(long)]
    pub username: String,
    /// Contact address
    #[arg(long)]
    pub email: String,
    /// Given name
    #[arg(long)]
    pub first_name: String,
    /// Family name
    #[arg(long)]
    pub last_name: String,
    /// Requested role; the backend default applies when omitted
    #[arg(long)]
    pub role: Option<String>,
}

pub async fn login(ctx: &AppContext, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = read_password()?;

    let response = ctx
        .store
        .login(&LoginRequest { username, password })
        .await
        .context("login failed")?;
    if let Some(message) = response.message {
        println!("{message}");
    }
    print_session(ctx);
    Ok(())
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let password = read_password()?;
    let request = RegisterRequest {
        username: args.username,
        password,
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        role: args.role,
    };

    let response = ctx
        .store
        .register(&request)
        .await
        .context("registration failed")?;
    if let Some(message) = response.message {
        println!("{message}");
    }
    print_session(ctx);
    Ok(())
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    let was_signed_in = ctx.store.snapshot().is_authenticated();
    ctx.store.logout().await;
    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub async fn whoami(ctx: &AppContext, verify: bool) -> Result<()> {
    let session = ctx.store.snapshot();
    let Some(user) = session.user.as_ref() else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{}", session.user_name());
    if let Some(username) = &user.username {
        println!("  username: {username}");
    }
    if let Some(email) = &user.email {
        println!("  email:    {email}");
    }
    if let Some(role) = session.user_role() {
        println!("  role:     {role}");
    }

    if verify {
        let Some(username) = user.username.as_deref() else {
            bail!("stored user has no username to verify against");
        };
        let valid = ctx
            .api()
            .validate_token(username)
            .await
            .context("token validation failed")?;
        if valid {
            println!("  token:    valid");
        } else {
            println!("  token:    rejected by the backend; run `vetclinic login` again");
        }
    }
    Ok(())
}

fn print_session(ctx: &AppContext) {
    let session = ctx.store.snapshot();
    if session.is_authenticated() {
        match session.user_role() {
            Some(role) => println!("Signed in as {} ({role}).", session.user_name()),
            None => println!("Signed in as {}.", session.user_name()),
        }
    } else {
        println!("No session was started.");
    }
}

fn read_password() -> Result<String> {
    let password = match env::var(PASSWORD_ENV) {
        Ok(password) => password,
        Err(_) => prompt_password("Password: ")?,
    };
    if password.trim().is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim().to_string();
    if trimmed.is_empty() {
        bail!("input must not be empty");
    }
    Ok(trimmed)
}

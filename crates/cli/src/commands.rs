//! CLI commands

use anyhow::{Result, bail};
use clap::Subcommand;
use portal_auth::{AdminLoginForm, CustomerLoginForm, LoginAttempt, PortalContext, ToastEvent};
use portal_core::StoredSession;
use std::path::PathBuf;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info};

use crate::config;

#[derive(Subcommand)]
pub enum Commands {
    /// Log in as an administrator
    AdminLogin {
        #[arg(short, long)]
        username: String,

        /// Password; prefer the environment variable over the flag
        #[arg(short, long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in as a customer with a voucher PIN
    CustomerLogin {
        /// 16-digit PIN; separators are ignored
        #[arg(long, env = "PORTAL_PIN", hide_env_values = true)]
        pin: String,
    },

    /// Exchange the stored refresh token for a new access token
    Refresh,

    /// Show the profile of the logged-in administrator
    Profile,

    /// Forget the stored session
    Logout,

    /// Show what the session store currently holds
    Session,

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate a configuration file with the default values
    Generate {
        /// Output file path (defaults to <data dir>/portal/config.json)
        output: Option<PathBuf>,
    },
}

impl Commands {
    pub async fn execute(self, config_file: Option<PathBuf>, timeout: Option<u64>) -> Result<()> {
        if let Commands::Config { command } = self {
            return command.execute();
        }

        let config = config::load_config(config_file.as_deref(), timeout)?;
        debug!(base_url = %config.api.base_url, "Loaded configuration");
        let ctx = PortalContext::from_config(&config)?;
        let mut toasts = ctx.toasts.subscribe();

        let result = self.run(&ctx).await;
        print_toasts(&mut toasts);
        result
    }

    async fn run(self, ctx: &PortalContext) -> Result<()> {
        match self {
            Commands::AdminLogin { username, password } => {
                let mut form = AdminLoginForm::new(username, password);
                let result = form.submit(&ctx.auth).await;
                report_attempt(form.attempt(), result.is_ok())?;
                println!("Logged in as administrator");
                Ok(())
            }
            Commands::CustomerLogin { pin } => {
                let mut form = CustomerLoginForm::new();
                for c in pin.chars() {
                    form.type_char(c);
                }
                let result = form.submit(&ctx.customer_auth).await;
                report_attempt(form.attempt(), result.is_ok())?;
                if let Ok(response) = result {
                    println!("Logged in as customer (expires in {}s)", response.expires_in);
                }
                Ok(())
            }
            Commands::Refresh => {
                ctx.auth.refresh_session().await?;
                println!("Access token refreshed");
                Ok(())
            }
            Commands::Profile => {
                let profile = ctx.profile.get_profile().await?;
                info!(username = %profile.user.username, "Fetched profile");
                println!("{}", serde_json::to_string_pretty(&profile)?);
                Ok(())
            }
            Commands::Logout => {
                ctx.auth.logout()?;
                println!("Logged out");
                Ok(())
            }
            Commands::Session => {
                print_session(&ctx.session.current());
                Ok(())
            }
            Commands::Config { command } => command.execute(),
        }
    }
}

impl ConfigCommands {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommands::Generate { output } => {
                let config_path = output.unwrap_or_else(config::default_config_path);
                config::generate_default_config(&config_path)?;
                println!("Generated configuration at: {}", config_path.display());
                Ok(())
            }
        }
    }
}

/// Print the inline form message and turn a failed attempt into an error
fn report_attempt(attempt: &LoginAttempt, succeeded: bool) -> Result<()> {
    if succeeded {
        return Ok(());
    }
    match attempt.error() {
        Some(message) => bail!("{message}"),
        None => bail!("Login failed"),
    }
}

fn print_session(session: &StoredSession) {
    if session.is_empty() {
        println!("No stored session");
        return;
    }
    let state = |value: &Option<String>| if value.is_some() { "set" } else { "-" };
    println!("accessToken:  {}", state(&session.access_token));
    println!("refreshToken: {}", state(&session.refresh_token));
    println!(
        "expiresIn:    {}",
        session.expires_in.as_deref().unwrap_or("-")
    );
}

/// Print every notification raised while the command ran
fn print_toasts(rx: &mut Receiver<ToastEvent>) {
    loop {
        match rx.try_recv() {
            Ok(ToastEvent::Show(toast)) => {
                eprintln!("[{}] {}", toast.kind.as_str(), toast.message);
            }
            Ok(ToastEvent::Dismiss) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "Dropped notifications");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

use access_gate::services::auth::TokenCodec;
use anyhow::{Result, bail};
use clap::Parser;

/// Sign an HS256 access token for local testing against the API.
///
/// Uses the same codec as the server, so a token printed here decodes there as long as the
/// secret matches.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Shared signing secret (same value as the server's JWT_SECRET)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    /// Subject user id (`userId` claim)
    #[arg(long)]
    user_id: i64,

    /// Username claim
    #[arg(long, default_value = "")]
    username: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 86_400)]
    ttl_seconds: u64,

    /// Print `Authorization: Bearer <token>` instead of the bare token
    #[arg(long, default_value_t = false)]
    header: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.secret.trim().is_empty() {
        bail!("secret must not be empty");
    }

    let codec = TokenCodec::new(&args.secret, 0);
    let token = codec.issue(args.user_id, &args.username, args.ttl_seconds)?;

    if args.header {
        println!("Authorization: Bearer {token}");
    } else {
        println!("{token}");
    }

    Ok(())
}

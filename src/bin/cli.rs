use redish::session::{self, Prompt};
use redish::{logging, BlockingClient, Cli, ConnectionDescriptor, Exit};

use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args(std::env::args());

    logging::init(&cli.log_level);

    if cli.help {
        println!("{}", redish::config::usage());
        process::exit(0);
    }

    if cli.version {
        println!("{}", redish::config::version_line());
        process::exit(0);
    }

    process::exit(run(cli).code());
}

fn run(cli: Cli) -> Exit {
    let descriptor = match ConnectionDescriptor::from_cli(&cli, |key| std::env::var(key).ok()) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            error!(cause = %err, "invalid configuration");
            return Exit::Failure;
        }
    };

    info!(server = %descriptor, "connecting");

    let mut client = match BlockingClient::connect(&descriptor) {
        Ok(client) => client,
        Err(err) => {
            error!(cause = %err, "Failed to connect to Redis");
            return Exit::Failure;
        }
    };

    let mut out = std::io::stdout();

    session::run(&mut client, cli.batch(), Prompt::new, &mut out)
}

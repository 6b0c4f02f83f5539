use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;
mod settings;

#[derive(Parser)]
#[command(name = "inkdown-cli", version, about = "Inkdown CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a phrase into a time expression
    Parse(commands::parse::ParseArgs),
    /// Timer board management
    Board {
        #[command(subcommand)]
        action: commands::board::BoardAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Parse(args) => commands::parse::run(args),
        Commands::Board { action } => commands::board::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            0
        }
    };
    std::process::exit(code);
}

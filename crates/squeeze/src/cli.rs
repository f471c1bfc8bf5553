use clap::{Args, Parser, Subcommand};
use squeeze_core::{Config, Engine, Rate};

#[derive(Parser)]
#[command(name = "squeeze")]
#[command(version)]
#[command(about = "JSON stdin/stdout bridge for prompt context compression")]
pub struct Cli {
    /// Defaults to `compress` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a request from stdin, write the compressed result to stdout
    Compress(CompressArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CompressArgs {
    /// Backend: scaledown or extractive
    #[arg(long)]
    pub engine: Option<Engine>,

    /// Model the compressed context is tuned for
    #[arg(long)]
    pub target_model: Option<String>,

    /// Compression rate: "auto" or a fraction in (0, 1]
    #[arg(long)]
    pub rate: Option<Rate>,

    /// Contexts shorter than this many characters are returned unchanged
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Output budget for the extractive engine, in tokens
    #[arg(long)]
    pub max_tokens: Option<usize>,
}

impl CompressArgs {
    /// Overlay command-line flags on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(engine) = self.engine {
            config.engine = engine;
        }
        if let Some(model) = &self.target_model {
            config.target_model = model.clone();
        }
        if let Some(rate) = self.rate {
            config.rate = rate;
        }
        if let Some(min_chars) = self.min_chars {
            config.min_chars = min_chars;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_subcommand() {
        let cli = Cli::try_parse_from(["squeeze"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["squeeze", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Some(Commands::Version)));
    }

    #[test]
    fn test_cli_parse_compress_flags() {
        let cli = Cli::try_parse_from([
            "squeeze",
            "compress",
            "--engine",
            "extractive",
            "--rate",
            "0.4",
            "--max-tokens",
            "200",
        ])
        .unwrap();

        if let Some(Commands::Compress(args)) = cli.command {
            let mut config = Config::new();
            args.apply(&mut config);
            assert_eq!(config.engine, Engine::Extractive);
            assert_eq!(config.rate, Rate::Fixed(0.4));
            assert_eq!(config.max_tokens, 200);
            assert_eq!(config.target_model, "gpt-4o");
        } else {
            panic!("Expected Compress command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_engine() {
        let cli = Cli::try_parse_from(["squeeze", "compress", "--engine", "gzip"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_default_args_leave_config_untouched() {
        let mut config = Config::new();
        CompressArgs::default().apply(&mut config);
        assert_eq!(config.engine, Engine::ScaleDown);
        assert_eq!(config.min_chars, 100);
    }
}

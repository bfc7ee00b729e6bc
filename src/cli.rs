use crate::mode::Mode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "captcha-ocr-server")]
#[command(about = "Local CAPTCHA OCR server")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "CAPTCHA_OCR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CAPTCHA_OCR_PORT", default_value = "65435")]
    pub port: u16,

    /// OCR engine to use ("ocrs" or "tesseract", depending on build features)
    #[arg(long, env = "CAPTCHA_OCR_ENGINE", default_value = "ocrs")]
    pub engine: String,

    /// Maximum upload size in bytes (default: 5MB)
    #[arg(long, env = "CAPTCHA_OCR_MAX_FILE_SIZE", default_value = "5242880")]
    pub max_file_size: usize,

    /// Upper bound on the time spent solving one request, in milliseconds
    #[arg(long, env = "CAPTCHA_OCR_SOLVE_TIMEOUT_MS", default_value = "15000")]
    pub solve_timeout_ms: u64,

    /// Path to tessdata directory (downloaded to the cache dir if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Solve a single image file and print the text
    Solve {
        /// Path to the input image
        #[arg(long)]
        image: PathBuf,

        /// Recognition mode: numeric (digits), alpha (letters), alnum (letters+digits)
        #[arg(long, default_value = "alnum")]
        mode: Mode,

        /// Expected CAPTCHA length; 0 means no fixed length
        #[arg(long, default_value = "0")]
        length: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serving() {
        let args = Args::parse_from(["captcha-ocr-server"]);
        assert_eq!(args.port, 65435);
        assert_eq!(args.engine, "ocrs");
        assert!(args.command.is_none());
    }

    #[test]
    fn test_solve_subcommand() {
        let args = Args::parse_from([
            "captcha-ocr-server",
            "solve",
            "--image",
            "captcha.png",
            "--mode",
            "numeric",
            "--length",
            "5",
        ]);
        match args.command {
            Some(Command::Solve {
                image,
                mode,
                length,
            }) => {
                assert_eq!(image, PathBuf::from("captcha.png"));
                assert_eq!(mode, Mode::Numeric);
                assert_eq!(length, 5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let result = Args::try_parse_from([
            "captcha-ocr-server",
            "solve",
            "--image",
            "a.png",
            "--mode",
            "hex",
        ]);
        assert!(result.is_err());
    }
}

//! Command-line interface for the excerpt toolkit.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::byline::{byline, BylineOptions};
use crate::config::{
    validate_sentence_count, Settings, DEFAULT_SENTENCE_COUNT, TEXT_WRAP_WIDTH,
};
use crate::error::Result;
use crate::excerpt::build_excerpt;
use crate::gravatar::GravatarChecker;
use crate::markup::{clean_text_with, ShortcodeSet};
use crate::sentences::Sentences;
use crate::social::social_links;
use crate::types::{Post, View};

/// Newsdesk excerpt - Sentence-aware teasers, bylines and share markup.
#[derive(Parser)]
#[command(name = "newsdesk-excerpt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trim text to its first sentences (reads stdin without FILE).
    Trim {
        /// Input file with text or HTML
        file: Option<PathBuf>,

        /// Number of sentences to keep
        #[arg(short, long, default_value_t = DEFAULT_SENTENCE_COUNT)]
        sentences: usize,

        /// Wrap the output to lines of at most WIDTH columns
        #[arg(short, long)]
        wrap: bool,

        /// Line width used with --wrap
        #[arg(long, default_value_t = TEXT_WRAP_WIDTH)]
        width: usize,

        /// Print the kept sentences as a JSON array
        #[arg(long)]
        json: bool,

        /// Strip every bracketed shortcode, not only the registered ones
        #[arg(long)]
        all_shortcodes: bool,
    },

    /// Build the teaser paragraph for a post.
    Excerpt {
        /// Post YAML file
        #[arg(short, long)]
        post: PathBuf,

        /// Site settings YAML file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Override the configured sentence count
        #[arg(long)]
        sentences: Option<usize>,

        /// Render as on the front page (honours <!--more-->)
        #[arg(long)]
        home: bool,
    },

    /// Render the byline for a post.
    Byline {
        /// Post YAML file
        #[arg(short, long)]
        post: PathBuf,

        /// Site settings YAML file
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Leave out the publication time
        #[arg(long)]
        exclude_date: bool,

        /// Render as on a single post page
        #[arg(long)]
        single: bool,
    },

    /// Render the share bar for a post.
    Social {
        /// Post YAML file
        #[arg(short, long)]
        post: PathBuf,

        /// Site settings YAML file
        #[arg(short, long)]
        settings: Option<PathBuf>,
    },

    /// Check whether an e-mail address has a gravatar.
    Gravatar {
        /// E-mail address
        email: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Trim {
            file,
            sentences,
            wrap,
            width,
            json,
            all_shortcodes,
        } => {
            let wrap = wrap.then_some(width);
            let shortcodes = if all_shortcodes {
                ShortcodeSet::Any
            } else {
                ShortcodeSet::default()
            };
            trim_command(file.as_deref(), sentences, wrap, json, &shortcodes)
        }
        Commands::Excerpt {
            post,
            settings,
            sentences,
            home,
        } => excerpt_command(&post, settings.as_deref(), sentences, home),
        Commands::Byline {
            post,
            settings,
            exclude_date,
            single,
        } => byline_command(&post, settings.as_deref(), exclude_date, single),
        Commands::Social { post, settings } => social_command(&post, settings.as_deref()),
        Commands::Gravatar { email } => gravatar_command(&email),
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn load_post(path: &Path) -> Result<Post> {
    Post::from_yaml(&fs::read_to_string(path)?)
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    path.map_or_else(|| Ok(Settings::default()), Settings::load)
}

/// Execute the trim command.
fn trim_command(
    file: Option<&Path>,
    sentences: usize,
    wrap: Option<usize>,
    json: bool,
    shortcodes: &ShortcodeSet,
) -> Result<()> {
    validate_sentence_count(sentences)?;
    let input = read_input(file)?;
    let clean = clean_text_with(&input, shortcodes);
    let kept: Vec<&str> = Sentences::new(&clean).take(sentences).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&kept)?);
        return Ok(());
    }

    let output = kept.join(" ");
    match wrap {
        Some(width) if width > 0 => println!("{}", textwrap::fill(&output, width)),
        _ => println!("{output}"),
    }
    Ok(())
}

/// Execute the excerpt command.
fn excerpt_command(
    post_path: &Path,
    settings_path: Option<&Path>,
    sentences: Option<usize>,
    home: bool,
) -> Result<()> {
    let post = load_post(post_path)?;
    let mut options = load_settings(settings_path)?.excerpt;
    if let Some(count) = sentences {
        validate_sentence_count(count)?;
        options.sentence_count = count;
    }
    let view = if home { View::Home } else { View::Archive };

    println!("{}", build_excerpt(&post, &options, view));
    Ok(())
}

/// Execute the byline command.
fn byline_command(
    post_path: &Path,
    settings_path: Option<&Path>,
    exclude_date: bool,
    single: bool,
) -> Result<()> {
    let post = load_post(post_path)?;
    let settings = load_settings(settings_path)?;
    let options = BylineOptions {
        exclude_date,
        view: if single { View::Single } else { View::Archive },
        clean_read: settings.clean_read,
    };

    println!("{}", byline(&post, options, chrono::Utc::now()));
    Ok(())
}

/// Execute the social command.
fn social_command(post_path: &Path, settings_path: Option<&Path>) -> Result<()> {
    let post = load_post(post_path)?;
    let settings = load_settings(settings_path)?;

    println!("{}", social_links(&post, &settings.social));
    Ok(())
}

/// Execute the gravatar command.
fn gravatar_command(email: &str) -> Result<()> {
    let checker = GravatarChecker::new()?;

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Looking up gravatar for {email}..."));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let found = match checker.has_gravatar(email) {
        Ok(found) => found,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    if found {
        println!("{} {}", style("Gravatar found for").green().bold(), style(email).cyan());
    } else {
        println!("{} {}", style("No gravatar for").yellow().bold(), style(email).cyan());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_trim_defaults() {
        let cli = Cli::parse_from(["newsdesk-excerpt", "trim"]);

        let Commands::Trim {
            file,
            sentences,
            wrap,
            width,
            json,
            ..
        } = cli.command
        else {
            panic!("expected trim command");
        };
        assert!(file.is_none());
        assert_eq!(sentences, DEFAULT_SENTENCE_COUNT);
        assert!(!wrap);
        assert_eq!(width, TEXT_WRAP_WIDTH);
        assert!(!json);
    }

    #[test]
    fn test_cli_parse_trim_with_options() {
        let cli = Cli::parse_from([
            "newsdesk-excerpt",
            "trim",
            "story.html",
            "--sentences",
            "2",
            "--wrap",
            "--width",
            "60",
            "--json",
        ]);

        let Commands::Trim {
            file,
            sentences,
            wrap,
            width,
            json,
            ..
        } = cli.command
        else {
            panic!("expected trim command");
        };
        assert_eq!(file, Some(PathBuf::from("story.html")));
        assert_eq!(sentences, 2);
        assert!(wrap);
        assert_eq!(width, 60);
        assert!(json);
    }

    #[test]
    fn test_cli_parse_trim_all_shortcodes() {
        let cli = Cli::parse_from(["newsdesk-excerpt", "trim", "--all-shortcodes"]);
        assert!(matches!(
            cli.command,
            Commands::Trim {
                all_shortcodes: true,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_negative_sentences() {
        assert!(Cli::try_parse_from(["newsdesk-excerpt", "trim", "--sentences", "-1"]).is_err());
    }

    #[test]
    fn test_cli_parse_excerpt() {
        let cli = Cli::parse_from([
            "newsdesk-excerpt",
            "excerpt",
            "--post",
            "post.yaml",
            "--home",
        ]);

        let Commands::Excerpt {
            post,
            settings,
            sentences,
            home,
        } = cli.command
        else {
            panic!("expected excerpt command");
        };
        assert_eq!(post, PathBuf::from("post.yaml"));
        assert!(settings.is_none());
        assert!(sentences.is_none());
        assert!(home);
    }

    #[test]
    fn test_cli_parse_gravatar() {
        let cli = Cli::parse_from(["newsdesk-excerpt", "gravatar", "ann@example.org"]);
        assert!(matches!(cli.command, Commands::Gravatar { email } if email == "ann@example.org"));
    }
}

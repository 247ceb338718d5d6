//! `cinema` command-line client.

mod app;
mod commands;
mod console;
mod render;

use anyhow::Result;
use app::App;
use commands::Reported;
use cinema_application::MovieListView;
use cinema_core::pager::{DEFAULT_PAGE_SIZE, SortKey};
use clap::{Args, Parser, Subcommand};
use console::Output;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cinema")]
#[command(about = "Browse, rate and bookmark movies from the Cinema catalog", long_about = None)]
struct Cli {
    /// Root directory for config and local storage
    #[arg(long, global = true, env = "CINEMA_HOME")]
    data_dir: Option<PathBuf>,

    /// Explicit config file
    #[arg(long = "config", global = true)]
    config_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title and remember the query
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Browse the catalog page by page
    Movies(PageArgs),
    /// Show one movie with its reviews
    Detail { movie_id: String },
    /// Top 10 by rating
    Ranking,
    /// List the reviews of a movie
    Reviews { movie_id: String },
    /// Write, edit or delete your reviews
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Filter the catalog
    Filter(FilterArgs),
    /// Bookmarks of the logged-in user
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Recent searches
    History,
    /// Log in and store the session locally
    Login {
        login_id: String,
        #[arg(long, env = "CINEMA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the local session
    Logout,
    /// Create an account
    Register(RegisterArgs),
    /// Show the logged-in user
    Whoami,
    /// Edit the locally stored profile
    Profile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Recover a login id from email and phone
    FindId {
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    /// Reset a forgotten password
    ResetPassword {
        #[arg(long = "id")]
        login_id: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CINEMA_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "CINEMA_NEW_PASSWORD", hide_env_values = true)]
        confirm: String,
    },
    /// Import movies from the external source
    Crawl {
        #[command(subcommand)]
        action: CrawlAction,
    },
    /// Ask the recommendation assistant
    Chat {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Show or set the chat panel opacity (0-100)
    Opacity {
        #[arg(allow_negative_numbers = true)]
        value: Option<i64>,
    },
    /// Catalog administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: i64,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    size: u32,
    #[arg(long, default_value_t = SortKey::Latest)]
    sort: SortKey,
    /// Restrict to titles matching this text
    #[arg(long)]
    query: Option<String>,
}

#[derive(Args)]
struct FilterArgs {
    /// List the available genres, countries and years instead
    #[arg(long)]
    options: bool,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    min_rating: Option<f64>,
    #[arg(long)]
    max_rating: Option<f64>,
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long = "id")]
    login_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long, env = "CINEMA_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, env = "CINEMA_PASSWORD", hide_env_values = true)]
    confirm: String,
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Rate a movie (2, 4, 6, 8 or 10) with a short text
    Add {
        movie_id: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        text: String,
    },
    /// Edit one of your reviews
    Edit {
        movie_id: String,
        review_id: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        text: String,
    },
    /// Delete one of your reviews
    Delete { movie_id: String, review_id: String },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Add or remove a bookmark
    Toggle { movie_id: String },
    /// List bookmarked movies
    List,
}

#[derive(Subcommand)]
enum CrawlAction {
    /// Find candidates on the external source
    Search { query: String },
    /// Import one movie, by candidate id or by title
    Fetch {
        /// Candidate id from `crawl search`
        #[arg(long, requires = "title")]
        id: Option<String>,
        #[arg(long)]
        title: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Catalog totals
    Stats,
    /// Paged movie table
    Movies(PageArgs),
    /// All reviews, optionally filtered
    Reviews {
        #[arg(long)]
        search: Option<String>,
    },
    /// Edit movie fields; omitted fields keep their current value
    UpdateMovie {
        movie_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        director: Option<String>,
        #[arg(long)]
        year: Option<String>,
        /// Running time in minutes
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        synopsis: Option<String>,
    },
    DeleteMovie { movie_id: String },
    DeleteReview { review_id: String },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let app = App::build(cli.data_dir.as_deref(), cli.config_file)?;
    let out = Output { json: cli.json };

    match run(&app, out, cli.command).await {
        Err(e) if e.is::<Reported>() => std::process::exit(1),
        other => other,
    }
}

async fn run(app: &App, out: Output, command: Commands) -> Result<()> {
    match command {
        Commands::Search { query } => commands::movies::search(app, out, &query.join(" ")).await?,
        Commands::Movies(args) => {
            let view = MovieListView::new(
                app.data.api().clone(),
                app.notifier.clone(),
                args.size,
                args.sort,
            );
            commands::movies::browse(app, out, &view, args.page, args.query.as_deref()).await?
        }
        Commands::Detail { movie_id } => commands::movies::detail(app, out, &movie_id).await?,
        Commands::Ranking => commands::movies::ranking(app, out).await?,
        Commands::Filter(args) => {
            if args.options {
                commands::movies::filter_options(app, out).await?
            } else {
                let filter = cinema_core::movie::MovieFilter {
                    genre: args.genre,
                    country: args.country,
                    year: args.year,
                    min_rating: args.min_rating,
                    max_rating: args.max_rating,
                    query: args.query,
                    limit: args.limit,
                };
                commands::movies::filter(app, out, &filter).await?
            }
        }
        Commands::Reviews { movie_id } => commands::reviews::list(app, out, &movie_id).await?,
        Commands::Review { action } => match action {
            ReviewAction::Add {
                movie_id,
                rating,
                text,
            } => commands::reviews::add(app, out, &movie_id, rating, &text).await?,
            ReviewAction::Edit {
                movie_id,
                review_id,
                rating,
                text,
            } => commands::reviews::edit(app, out, &movie_id, &review_id, rating, &text).await?,
            ReviewAction::Delete {
                movie_id,
                review_id,
            } => commands::reviews::delete(app, out, &movie_id, &review_id).await?,
        },
        Commands::Bookmark { action } => match action {
            BookmarkAction::Toggle { movie_id } => {
                commands::bookmarks::toggle(app, out, &movie_id).await?
            }
            BookmarkAction::List => commands::bookmarks::list(app, out).await?,
        },
        Commands::History => commands::account::history(app, out)?,
        Commands::Login { login_id, password } => {
            commands::account::login(app, out, &login_id, &password).await?
        }
        Commands::Logout => commands::account::logout(app, out)?,
        Commands::Register(args) => {
            let form = cinema_core::user::Registration {
                login_id: args.login_id,
                username: args.name,
                email: args.email,
                phone: args.phone,
                password: args.password,
                password_confirmation: args.confirm,
            };
            commands::account::register(app, out, &form).await?
        }
        Commands::Whoami => commands::account::whoami(app, out)?,
        Commands::Profile { name, email, phone } => {
            commands::account::profile(app, out, name, email, phone)?
        }
        Commands::FindId { email, phone } => {
            commands::account::find_id(app, out, &email, &phone).await?
        }
        Commands::ResetPassword {
            login_id,
            email,
            password,
            confirm,
        } => commands::account::reset_password(app, out, &login_id, &email, &password, &confirm)
            .await?,
        Commands::Crawl { action } => match action {
            CrawlAction::Search { query } => commands::crawl::search(app, out, &query).await?,
            CrawlAction::Fetch { id, title } => {
                commands::crawl::fetch(app, out, id.as_deref(), &title).await?
            }
        },
        Commands::Chat { question } => commands::chat::ask(app, out, &question.join(" ")).await?,
        Commands::Opacity { value } => commands::chat::opacity(app, out, value)?,
        Commands::Admin { action } => match action {
            AdminAction::Stats => commands::admin::stats(app, out).await?,
            AdminAction::Movies(args) => {
                let view = app.admin.movie_table(args.size, args.sort);
                commands::movies::browse(app, out, &view, args.page, args.query.as_deref()).await?
            }
            AdminAction::Reviews { search } => {
                commands::admin::reviews(app, out, search.as_deref()).await?
            }
            AdminAction::UpdateMovie {
                movie_id,
                title,
                genre,
                director,
                year,
                minutes,
                synopsis,
            } => {
                let edits = commands::admin::MovieEdits {
                    title,
                    genre,
                    director,
                    release_year: year,
                    minutes,
                    synopsis,
                };
                commands::admin::update_movie(app, out, &movie_id, edits).await?
            }
            AdminAction::DeleteMovie { movie_id } => {
                commands::admin::delete_movie(app, out, &movie_id).await?
            }
            AdminAction::DeleteReview { review_id } => {
                commands::admin::delete_review(app, out, &review_id).await?
            }
        },
        Commands::Config => commands::account::show_config(app, out)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_paging_flags() {
        let cli = Cli::parse_from(["cinema", "movies", "--page", "3", "--sort", "rating"]);
        match cli.command {
            Commands::Movies(args) => {
                assert_eq!(args.page, 3);
                assert_eq!(args.sort, SortKey::Rating);
                assert_eq!(args.size, DEFAULT_PAGE_SIZE);
            }
            _ => panic!("expected movies"),
        }
    }

    #[test]
    fn test_parse_review_add() {
        let cli = Cli::parse_from([
            "cinema", "review", "add", "42", "--rating", "8", "--text", "tense",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Review {
                action: ReviewAction::Add { rating: 8, .. }
            }
        ));
    }
}

//! Text rendering of domain values.
//!
//! Every function is pure: it turns values into lines and leaves printing to
//! the caller. Server-provided text is stripped of control characters before
//! it reaches the terminal.

use cinema_application::{AdminStats, ListSnapshot};
use cinema_core::chat::ChatReply;
use cinema_core::crawl::{CrawlOutcome, CrawlSearchResult};
use cinema_core::movie::{FilterOptions, Movie, RatingTheme};
use cinema_core::review::Review;
use cinema_core::user::Session;
use colored::{ColoredString, Colorize};

const SYNOPSIS_WIDTH: usize = 72;

/// Removes terminal control characters (escape sequences included).
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect::<String>()
        .trim()
        .to_string()
}

fn themed(theme: RatingTheme, text: String) -> ColoredString {
    match theme {
        RatingTheme::Premium => text.bright_magenta().bold(),
        RatingTheme::Good => text.green(),
        RatingTheme::Average => text.yellow(),
        RatingTheme::Poor => text.bright_black(),
    }
}

/// One-line movie card.
pub fn movie_line(movie: &Movie) -> String {
    let rating = movie.display_rating();
    let theme = movie.theme();
    let mut line = format!(
        "{:>10}  {}",
        clean(&movie.id).dimmed(),
        clean(&movie.title).bold()
    );
    if let Some(year) = movie.release_year.as_deref().map(clean).filter(|y| !y.is_empty()) {
        line.push_str(&format!(" ({})", year));
    }
    if let Some(genre) = movie.genre.as_deref().map(clean).filter(|g| !g.is_empty()) {
        line.push_str(&format!("  {}", genre.cyan()));
    }
    line.push_str(&format!("  {}", themed(theme, format!("★ {:.1}", rating))));
    if let Some(count) = movie.review_count.filter(|c| *c > 0) {
        line.push_str(&format!("  ({} reviews)", count));
    }
    line
}

pub fn movie_list(movies: &[Movie]) -> Vec<String> {
    if movies.is_empty() {
        return vec!["No movies found.".dimmed().to_string()];
    }
    movies.iter().map(movie_line).collect()
}

pub fn ranking(movies: &[Movie]) -> Vec<String> {
    if movies.is_empty() {
        return vec!["Ranking unavailable.".dimmed().to_string()];
    }
    movies
        .iter()
        .map(|movie| {
            let rank = movie.rank.map(|r| format!("{:>2}.", r)).unwrap_or_default();
            format!("{} {}", rank.bold(), movie_line(movie))
        })
        .collect()
}

/// Detail page: header, facts, synopsis, bookmark state.
pub fn movie_detail(movie: &Movie, bookmarked: Option<bool>) -> Vec<String> {
    let theme = movie.theme();
    let mut lines = vec![
        format!(
            "{}  {}",
            clean(&movie.title).bold().underline(),
            themed(theme, format!("[{}]", theme))
        ),
    ];

    let facts = [
        ("Genre", movie.genre.as_deref()),
        ("Released", movie.release_year.as_deref()),
        ("Runtime", movie.duration.as_deref()),
        ("Director", movie.director.as_deref()),
        ("Cast", movie.cast.as_deref()),
    ];
    for (label, value) in facts {
        if let Some(value) = value.map(clean).filter(|v| !v.is_empty()) {
            lines.push(format!("  {:<9} {}", label.dimmed(), value));
        }
    }

    let mut ratings = format!("  {:<9} {:.1}", "Rating".dimmed(), movie.display_rating());
    if let Some(critic) = movie.critic_rating {
        ratings.push_str(&format!("  critics {:.1}", critic));
    }
    if let Some(audience) = movie.audience_rating {
        ratings.push_str(&format!("  audience {:.1}", audience));
    }
    if let Some(user) = movie.user_rating.filter(|r| *r > 0.0) {
        ratings.push_str(&format!("  users {:.1}", user));
    }
    lines.push(ratings);

    if let Some(bookmarked) = bookmarked {
        let mark = if bookmarked { "♥ bookmarked".red() } else { "♡ not bookmarked".normal() };
        lines.push(format!("  {}", mark));
    }

    if let Some(synopsis) = movie.synopsis.as_deref().map(clean).filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.extend(wrap(&synopsis, SYNOPSIS_WIDTH).into_iter().map(|l| format!("  {}", l)));
    }
    lines
}

pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.div_ceil(2)).min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Formats a review date; unknown dates render as `-`.
pub fn review_date(review: &Review) -> String {
    if review.created_at.timestamp() == 0 {
        "-".to_string()
    } else {
        review.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Review list. `viewer` marks the reviews the user may edit.
pub fn reviews(reviews: &[Review], viewer: Option<&Session>) -> Vec<String> {
    if reviews.is_empty() {
        return vec!["No reviews yet.".dimmed().to_string()];
    }
    reviews
        .iter()
        .flat_map(|review| {
            let mine = viewer.is_some_and(|s| review.is_owned_by(s));
            let mut header = format!(
                "{} {}  {}  {}",
                stars(review.rating).yellow(),
                clean(&review.author).bold(),
                review_date(review).dimmed(),
                format!("#{}", clean(&review.id)).dimmed()
            );
            if mine {
                header.push_str(&format!("  {}", "(mine)".green()));
            }
            if let Some(title) = review.movie_title.as_deref().map(clean) {
                header.push_str(&format!("  on {}", title.italic()));
            }
            [header, format!("  {}", clean(&review.text))]
        })
        .collect()
}

/// Footer with page buttons, e.g. `‹ 1 2 [3] 4 5 › page 3/9`.
pub fn pager(snapshot: &ListSnapshot) -> String {
    let mut parts = Vec::new();
    parts.push(if snapshot.has_prev { "‹".normal() } else { "‹".dimmed() }.to_string());
    for page in snapshot.window.clone() {
        if page == snapshot.page.page_index {
            parts.push(format!("[{}]", page).bold().to_string());
        } else {
            parts.push(page.to_string());
        }
    }
    parts.push(if snapshot.has_next { "›".normal() } else { "›".dimmed() }.to_string());
    let total = match snapshot.page.total_count {
        Some(_) => snapshot.total_pages.to_string(),
        None => "?".to_string(),
    };
    format!(
        "{}  page {}/{} · sort {}",
        parts.join(" "),
        snapshot.page.page_index,
        total,
        snapshot.page.sort_key
    )
}

pub fn history(entries: &[String]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No recent searches.".dimmed().to_string()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{:>2}. {}", i + 1, clean(q)))
        .collect()
}

pub fn user(session: &Session) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", clean(&session.display_name).bold(), clean(&session.login_id)),
        format!("  email  {}", clean(&session.email)),
    ];
    if let Some(phone) = session.phone.as_deref() {
        lines.push(format!("  phone  {}", clean(phone)));
    }
    if let Some(joined) = session.created_at.as_deref() {
        lines.push(format!("  joined {}", clean(joined)));
    }
    lines
}

pub fn filter_options(options: &FilterOptions) -> Vec<String> {
    let join = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.iter().map(|i| clean(i)).collect::<Vec<_>>().join(", ")
        }
    };
    vec![
        format!("genres:    {}", join(&options.genres)),
        format!("countries: {}", join(&options.countries)),
        format!("years:     {}", join(&options.years)),
    ]
}

pub fn chat_reply(reply: &ChatReply) -> Vec<String> {
    let mut lines: Vec<String> = clean(&reply.answer).lines().map(str::to_string).collect();
    if !reply.movies.is_empty() {
        lines.push(String::new());
        for movie in &reply.movies {
            let year = movie.year().map(|y| format!(" ({})", y)).unwrap_or_default();
            let score = movie
                .vote_average
                .map(|v| format!("  ★ {:.1}", v))
                .unwrap_or_default();
            lines.push(format!("• {}{}{}", clean(&movie.title).bold(), year, score));
        }
    }
    if !reply.gpt_suggestions.is_empty() {
        let suggestions: Vec<String> = reply.gpt_suggestions.iter().map(|s| clean(s)).collect();
        lines.push(format!("Also try: {}", suggestions.join(", ").italic()));
    }
    lines
}

pub fn crawl_candidates(result: &CrawlSearchResult) -> Vec<String> {
    if result.results.is_empty() {
        return vec![format!("No candidates for '{}'.", clean(&result.query))];
    }
    result
        .results
        .iter()
        .map(|c| format!("{:>10}  {}", clean(&c.movie_id).dimmed(), clean(&c.title)))
        .collect()
}

pub fn crawl_outcome(outcome: &CrawlOutcome) -> String {
    let title = outcome
        .movie_title
        .as_deref()
        .map(clean)
        .unwrap_or_else(|| clean(&outcome.movie_id));
    if outcome.already_exists {
        format!("{} is already in the catalog (#{})", title, clean(&outcome.movie_id))
    } else {
        format!("Imported {} (#{})", title.green(), clean(&outcome.movie_id))
    }
}

pub fn admin_stats(stats: &AdminStats) -> Vec<String> {
    vec![
        format!("movies   {}", stats.total_movies),
        format!("reviews  {}", stats.total_reviews),
    ]
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

//! Printing of screen state.

use chrono::{DateTime, Utc};
use colored::Colorize;
use utsocial_application::ProfileStats;
use utsocial_core::auth::is_event_line;
use utsocial_core::feed::{CareerFilter, Comment, Post};
use utsocial_core::user::User;

pub fn terminal_lines(lines: &[String]) {
    for line in lines {
        if line.starts_with("> ERROR:") {
            println!("{}", line.red());
        } else if is_event_line(line) {
            println!("{}", line.bright_green());
        } else {
            println!("{}", line.green());
        }
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Prints posts numbered from 1 so commands can refer to them by position.
pub fn posts(posts: &[Post], filter: CareerFilter) {
    println!(
        "{}",
        format!("--- Feed [{}] ({} posts) ---", filter, posts.len()).bright_magenta()
    );
    if posts.is_empty() {
        println!("{}", "No posts yet.".bright_black());
    }
    for (index, post) in posts.iter().enumerate() {
        post_entry(index + 1, post);
    }
}

pub fn post_entry(number: usize, post: &Post) {
    println!(
        "{} {} {} {}",
        format!("[{}]", number).bright_cyan(),
        format!("@{}", post.author.username).bright_magenta(),
        post.career.as_str().yellow(),
        timestamp(&post.created_at).bright_black()
    );
    for line in post.content.lines() {
        println!("    {}", line);
    }
    for attachment in &post.attachments {
        let kind = if attachment.is_image() { "image" } else { "file" };
        println!(
            "    {}",
            format!("[{}: {}]", kind, attachment.filename).bright_black()
        );
    }
    println!(
        "    {}",
        format!(
            "{} comments  {} reactions  ({})",
            post.comment_count, post.reaction_count, post.id
        )
        .bright_black()
    );
}

pub fn comments(post: &Post, comments: &[Comment]) {
    println!(
        "{}",
        format!("--- Comments on @{}'s post ---", post.author.username).bright_magenta()
    );
    if comments.is_empty() {
        println!("{}", "No comments yet. Add one with /comment <text>".bright_black());
    }
    for comment in comments {
        println!(
            "  {} {}",
            format!("@{}", comment.author.username).bright_magenta(),
            timestamp(&comment.created_at).bright_black()
        );
        println!("    {}", comment.content);
    }
}

pub fn profile(user: &User, stats: ProfileStats) {
    let initial = user.initial().map(String::from).unwrap_or_default();
    println!(
        "{} {}",
        format!("({})", initial).bright_cyan(),
        format!("@{}", user.username).bright_magenta().bold()
    );
    println!("    {}", user.email.bright_black());
    match user.bio.as_deref().filter(|bio| !bio.is_empty()) {
        Some(bio) => println!("    {}", bio),
        None => println!("    {}", "No bio yet.".bright_black()),
    }
    let joined = match (user.joined_on(), user.join_date.as_deref()) {
        (Some(day), _) => Some(day.format("%B %Y").to_string()),
        (None, raw) => raw.map(str::to_string),
    };
    if let Some(joined) = joined {
        println!("    {}", format!("Joined {}", joined).bright_black());
    }
    println!(
        "    {}",
        format!(
            "{} posts  {} comments  {} reactions",
            stats.posts, stats.comments, stats.reactions
        )
        .yellow()
    );
}

pub fn help() {
    let entries = [
        ("/feed", "show the feed"),
        ("/filter [career]", "filter the feed by career (All to reset)"),
        ("/post <text>", "publish a post"),
        ("/react <n|id>", "react to a post"),
        ("/comments <n|id>", "open a post's comments"),
        ("/comment <text>", "comment on the open post"),
        ("/profile", "show your profile"),
        ("/edit", "edit username and bio"),
        ("/save, /cancel", "finish editing"),
        ("/logout", "end the session"),
        ("/quit", "leave"),
    ];
    for (command, text) in entries {
        println!("  {} {}", format!("{:<20}", command).bright_cyan(), text.bright_black());
    }
}

pub fn info(message: impl AsRef<str>) {
    println!("{}", message.as_ref().bright_black());
}

pub fn error(message: impl std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", message).red());
}

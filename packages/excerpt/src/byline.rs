//! Author links and bylines.

use chrono::{DateTime, Utc};

use crate::config::CleanRead;
use crate::markup::{escape_attr, escape_html};
use crate::time::{format_iso, post_time};
use crate::types::{Author, Post, View};

/// Options for [`byline`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BylineOptions {
    /// Leave out the publication time.
    pub exclude_date: bool,

    /// Page the byline is rendered on.
    pub view: View,

    /// Clean-read link placement from the site settings.
    pub clean_read: CleanRead,
}

/// Link to the author's archive, honouring a custom byline.
///
/// A custom byline without a link renders as plain (escaped) text.
pub fn author_link(post: &Post) -> String {
    match &post.byline {
        Some(custom) => match &custom.link {
            Some(link) => linked_name(&custom.text, link),
            None => escape_html(&custom.text),
        },
        None => linked_name(&post.author.display_name, &post.author.posts_url()),
    }
}

fn linked_name(name: &str, link: &str) -> String {
    format!(
        r#"<a class="url fn n" href="{}" title="{}" rel="author">{}</a>"#,
        escape_attr(link),
        escape_attr(&format!("More from {name}")),
        escape_html(name)
    )
}

/// Link for one co-author, with their organization in parentheses.
fn coauthor_link(author: &Author) -> String {
    let mut label = escape_html(&author.display_name);
    if let Some(org) = author.organization.as_deref().filter(|o| !o.is_empty()) {
        label.push_str(&format!(" ({})", escape_html(org)));
    }
    format!(
        r#"<a class="url fn n" href="/author/{}" title="Read All Posts By {}" rel="author">{label}</a>"#,
        escape_attr(&author.login),
        escape_attr(&author.display_name)
    )
}

/// Join rendered names as "A, B and C".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!(r#"{} <span class="and">and</span> {last}"#, rest.join(", ")),
    }
}

/// Author part of the byline: co-authors when present (and no custom
/// byline overrides them), otherwise the author link.
pub fn byline_authors(post: &Post) -> String {
    if post.byline.is_none() && !post.coauthors.is_empty() {
        let links: Vec<String> = post.coauthors.iter().map(coauthor_link).collect();
        join_names(&links)
    } else {
        author_link(post)
    }
}

/// Full byline: authors, publication time, edit link and clean-read toggle.
pub fn byline(post: &Post, options: BylineOptions, now: DateTime<Utc>) -> String {
    let mut output = format!(
        r#"<span class="by-author"><span class="by">By:</span> <span class="author vcard" itemprop="author">{}</span></span>"#,
        byline_authors(post)
    );

    if !options.exclude_date {
        output.push_str(&format!(
            r#"<span class="sep"> | </span><time class="entry-date updated dtstamp pubdate" datetime="{}">{}</time>"#,
            format_iso(post.published),
            post_time(post.published, now)
        ));
    }

    if let Some(edit) = &post.edit_link {
        output.push_str(&format!(
            r#"<span class="sep"> | </span><span class="edit-link"><a href="{}">Edit This Post</a></span>"#,
            escape_attr(edit)
        ));
    }

    if options.view == View::Single && options.clean_read == CleanRead::Byline {
        output.push_str(r##"<a href="#" class="clean-read">View as "Clean Read"</a>"##);
    }

    output
}

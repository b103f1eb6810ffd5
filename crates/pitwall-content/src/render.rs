//! Blog post rendering.
//!
//! Produces the frontmatter markdown the published site consumes. The output
//! is byte-stable for identical input: nothing time- or environment-
//! dependent enters the document beyond the post's own creation date. The
//! publisher's change detection depends on that stability.

use thiserror::Error;

use pitwall_models::{BlogPost, User};

/// Summary length in characters, taken from the start of the body.
const SUMMARY_LENGTH: usize = 100;

/// Render a blog post to frontmatter markdown.
///
/// The author's email is resolved via `author_lookup`; a missing author is
/// an error — posts are never published unattributed.
pub fn render_post<F>(post: &BlogPost, author_lookup: F) -> Result<String, RenderError>
where
    F: Fn(&str) -> Option<User>,
{
    let author = author_lookup(&post.author_id)
        .ok_or_else(|| RenderError::AuthorNotFound(post.author_id.clone()))?;

    Ok(format!(
        "---\n\
         title: \"{title}\"\n\
         date: {date}\n\
         draft: false\n\
         summary: \"{summary}...\"\n\
         showAuthor: true\n\
         authors:\n\
         \x20 - \"{email}\"\n\
         ---\n\
         \n\
         {content}\n",
        title = post.title,
        date = post.created_at.format("%Y-%m-%d"),
        summary = summarize(&post.content),
        email = author.email,
        content = post.content,
    ))
}

/// First [`SUMMARY_LENGTH`] characters of the body with markdown headings
/// and line breaks flattened out, trimmed. Empty content gives an empty
/// summary.
fn summarize(content: &str) -> String {
    let head: String = content.chars().take(SUMMARY_LENGTH).collect();
    head.replace('#', "").replace('\n', " ").trim().to_string()
}

/// Rendering error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Author not found: {0}")]
    AuthorNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post(content: &str) -> BlogPost {
        BlogPost {
            id: "first-race".to_string(),
            title: "First Race".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 3, 18, 30, 0).unwrap(),
            author_id: "user-1".to_string(),
            content: content.to_string(),
            image_ref: "https://images.example.com/cover.jpg".to_string(),
        }
    }

    fn lookup(author_id: &str) -> Option<User> {
        (author_id == "user-1").then(|| User::new("user-1", "driver@example.com"))
    }

    #[test]
    fn test_render_frontmatter_shape() {
        let markdown = render_post(&post("# Race Day\n\nWe went racing."), lookup).unwrap();

        assert!(markdown.starts_with("---\n"));
        assert!(markdown.contains("title: \"First Race\"\n"));
        assert!(markdown.contains("date: 2025-06-03\n"));
        assert!(markdown.contains("draft: false\n"));
        assert!(markdown.contains("summary: \"Race Day  We went racing....\"\n"));
        assert!(markdown.contains("authors:\n  - \"driver@example.com\"\n"));
        // Body is verbatim after the frontmatter and a blank line.
        assert!(markdown.ends_with("---\n\n# Race Day\n\nWe went racing.\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let p = post("Body text");
        assert_eq!(
            render_post(&p, lookup).unwrap(),
            render_post(&p, lookup).unwrap()
        );
    }

    #[test]
    fn test_missing_author_is_an_error() {
        let mut p = post("Body");
        p.author_id = "ghost".to_string();
        assert_eq!(
            render_post(&p, lookup),
            Err(RenderError::AuthorNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_summary_truncates_at_100_chars() {
        let body = "x".repeat(250);
        let markdown = render_post(&post(&body), lookup).unwrap();
        let expected = format!("summary: \"{}...\"", "x".repeat(100));
        assert!(markdown.contains(&expected));
    }

    #[test]
    fn test_summary_of_empty_content_is_empty() {
        let markdown = render_post(&post(""), lookup).unwrap();
        assert!(markdown.contains("summary: \"...\"\n"));
    }

    #[test]
    fn test_summary_strips_hashes_and_newlines() {
        assert_eq!(summarize("## Heading\nline two"), "Heading line two");
    }
}

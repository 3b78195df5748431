//! HTML page rendering for the Librarion interface
//!
//! Pages are plain strings assembled from session state and the
//! read-only artifacts. Every dynamic value goes through
//! [`escape_html`]; book titles in particular are arbitrary text.

use librarion_core::{BookRecord, PopularBook};

/// Which navigation tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Explore,
    Trending,
}

/// Escapes text for safe embedding in HTML bodies and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(active: Tab, body: &str) -> String {
    let (explore_class, trending_class) = match active {
        Tab::Explore => ("tab active", "tab"),
        Tab::Trending => ("tab", "tab active"),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Librarion</title>
    <style>
        body {{ font-family: -apple-system, sans-serif; margin: 0; background: #f5f5f5; color: #222; }}
        .nav {{ background: #2c3e50; padding: 0 2rem; display: flex; gap: 1rem; }}
        .tab {{ color: #bdc3c7; padding: 1rem; text-decoration: none; }}
        .tab.active {{ color: white; border-bottom: 3px solid #3498db; }}
        .page {{ max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }}
        .header {{ display: flex; justify-content: space-between; align-items: center; }}
        .panel {{ background: white; border: 1px solid #ddd; border-radius: 8px; padding: 2rem; display: flex; gap: 2rem; }}
        .panel img {{ width: 250px; }}
        .details b {{ font-size: 20px; }}
        .details span {{ font-size: 30px; font-weight: bold; }}
        .grid {{ display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; margin-top: 1rem; }}
        .card {{ background: white; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; text-align: center; }}
        .card img {{ width: 100%; }}
        button {{ background: #3498db; color: white; border: none; border-radius: 4px; padding: 0.5rem 1rem; cursor: pointer; }}
        select {{ padding: 0.5rem; min-width: 300px; }}
    </style>
</head>
<body>
    <nav class="nav">
        <a class="{explore_class}" href="/explore">Explore</a>
        <a class="{trending_class}" href="/trending">Trending</a>
    </nav>
    <div class="page">
{body}
    </div>
</body>
</html>
"#
    )
}

fn page_header(heading: &str) -> String {
    format!(
        r#"        <div class="header">
            <h1>{}</h1>
            <form method="post" action="/session/home"><button>home</button></form>
        </div>"#,
        escape_html(heading)
    )
}

/// Explore tab in browse mode: the book picker over all catalog titles.
pub fn explore_home<'a>(titles: impl Iterator<Item = &'a str>) -> String {
    let options: String = titles
        .map(|t| {
            let escaped = escape_html(t);
            format!(r#"                <option value="{escaped}">{escaped}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"{header}
        <form method="post" action="/books/select">
            <select name="title" required>
                <option value="" disabled selected>select a book</option>
{options}
            </select>
            <button type="submit">view</button>
        </form>"#,
        header = page_header("Book Recommendation System"),
    );
    layout(Tab::Explore, &body)
}

/// Explore tab in detail mode: the selected book's panel, the
/// recommendation toggle, and the grid of similar titles when open.
pub fn book_detail(record: &BookRecord, panel_open: bool, similar: &[&BookRecord]) -> String {
    let toggle_label = if panel_open {
        "hide recommendation"
    } else {
        "show recommendation"
    };

    let grid = if panel_open {
        let cards: String = similar
            .iter()
            .map(|book| recommendation_card(book))
            .collect::<Vec<_>>()
            .join("\n");
        format!("        <div class=\"grid\">\n{cards}\n        </div>")
    } else {
        String::new()
    };

    let body = format!(
        r#"{header}
        <div class="panel">
            <div>
                <h2>{title}</h2>
                <img src="{cover}" alt="{title}">
            </div>
            <div class="details">
                <p><b>Author&nbsp;:&nbsp;</b><span>{author}</span></p>
                <p><b>Year&nbsp;:&nbsp;</b><span>{year}</span></p>
                <p><b>Publisher&nbsp;:&nbsp;</b><span>{publisher}</span></p>
                <p><b>Rating&nbsp;:&nbsp;</b><span>{rating:.1}</span></p>
            </div>
        </div>
        <form method="post" action="/session/recommendations">
            <button type="submit">{toggle_label}</button>
        </form>
{grid}"#,
        header = page_header("Book Recommendation System"),
        title = escape_html(&record.title),
        cover = escape_html(&record.cover_url),
        author = escape_html(&record.author),
        year = record.year,
        publisher = escape_html(&record.publisher),
        rating = record.rating,
    );
    layout(Tab::Explore, &body)
}

fn recommendation_card(book: &BookRecord) -> String {
    let title = escape_html(&book.title);
    let cover = escape_html(&book.cover_url);
    format!(
        r#"            <div class="card">
                <img src="{cover}" alt="{title}">
                <form method="post" action="/books/view">
                    <input type="hidden" name="title" value="{title}">
                    <button type="submit">view</button>
                </form>
                <p>{title}</p>
            </div>"#
    )
}

/// Trending tab: the popularity list in producer rank order.
pub fn trending(entries: &[(&PopularBook, &BookRecord)]) -> String {
    let cards: String = entries
        .iter()
        .map(|(popular, record)| {
            let title = escape_html(&record.title);
            let cover = escape_html(&record.cover_url);
            format!(
                r#"            <div class="card">
                <p>Rating : {rating:.2}</p>
                <img src="{cover}" alt="{title}">
                <p>{title}</p>
            </div>"#,
                rating = popular.rating,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        "        <h1>Popular Books</h1>\n        <div class=\"grid\">\n{cards}\n        </div>"
    );
    layout(Tab::Trending, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn book(title: &str) -> BookRecord {
        BookRecord {
            title: title.to_owned(),
            author: "Jane Author".to_owned(),
            year: 1999,
            publisher: "Acme Press".to_owned(),
            cover_url: "http://covers.example.com/a.jpg".to_owned(),
            rating: 4.26,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"Tom & "Jerry" <escaped>'s"#),
            "Tom &amp; &quot;Jerry&quot; &lt;escaped&gt;&#39;s"
        );
    }

    #[test]
    fn test_explore_home_lists_titles() {
        let titles = ["Dune", "Emma"];
        let page = explore_home(titles.iter().copied());

        assert!(page.contains(r#"<option value="Dune">Dune</option>"#));
        assert!(page.contains(r#"<option value="Emma">Emma</option>"#));
        assert!(page.contains(r#"action="/books/select""#));
        assert!(page.contains("Book Recommendation System"));
    }

    #[test]
    fn test_book_detail_collapsed_panel() {
        let record = book("Dune");
        let page = book_detail(&record, false, &[]);

        assert!(page.contains("show recommendation"));
        assert!(!page.contains("class=\"grid\""));
        assert!(page.contains("Jane Author"));
        // Rating rounded to one decimal place.
        assert!(page.contains("4.3"));
    }

    #[test]
    fn test_book_detail_open_panel_renders_cards() {
        let record = book("Dune");
        let rec_a = book("Emma");
        let rec_b = book("Hamlet");
        let page = book_detail(&record, true, &[&rec_a, &rec_b]);

        assert!(page.contains("hide recommendation"));
        assert!(page.contains(r#"value="Emma""#));
        assert!(page.contains(r#"value="Hamlet""#));
        assert_eq!(page.matches(r#"action="/books/view""#).count(), 2);
    }

    #[test]
    fn test_book_detail_escapes_title() {
        let record = book(r#"Cat's "Cradle" <1963>"#);
        let page = book_detail(&record, false, &[]);

        assert!(page.contains("Cat&#39;s &quot;Cradle&quot; &lt;1963&gt;"));
        assert!(!page.contains("<1963>"));
    }

    #[test]
    fn test_trending_keeps_given_order() {
        let first = book("First");
        let second = book("Second");
        let popular_first = PopularBook {
            title: "First".to_owned(),
            rating: 4.917,
        };
        let popular_second = PopularBook {
            title: "Second".to_owned(),
            rating: 4.5,
        };

        let page = trending(&[(&popular_first, &first), (&popular_second, &second)]);

        let first_at = page.find("First").unwrap();
        let second_at = page.find("Second").unwrap();
        assert!(first_at < second_at);
        // Trending ratings are rounded to two decimal places.
        assert!(page.contains("Rating : 4.92"));
    }
}

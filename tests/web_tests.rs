//! End-to-end tests against a running server
//!
//! Run with: cargo test -- --ignored --test-threads=1
//! Requires a server listening on localhost:3000 with an empty database.

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:3000";

/// Client that does not follow redirects, so create/delete flows can be
/// asserted on the Location header
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

/// Post a form and return the redirect location, failing on a re-rendered
/// form or error page
async fn post_form(client: &Client, path: &str, form: &[(&str, &str)]) -> String {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .form(form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {}", path);
    response.headers()["location"].to_str().unwrap().to_string()
}

/// Create a book with valid fields and return its detail URL
async fn create_book(client: &Client, title: &str) -> String {
    post_form(
        client,
        "/book/create",
        &[
            ("title", title),
            ("description", "A novel of considerable length and reputation."),
            ("isbn", "9780140449174"),
            ("author", ""),
        ],
    )
    .await
}

/// Create a book instance for the given book id and return its detail URL
async fn create_instance(client: &Client, book_id: &str, imprint: &str, status: &str) -> String {
    post_form(
        client,
        "/bookInstance/create",
        &[("book", book_id), ("imprint", imprint), ("status", status)],
    )
    .await
}

/// Trailing id segment of a detail URL like `/genre/7`
fn id_of(location: &str) -> String {
    location.rsplit('/').next().unwrap().to_string()
}

struct DashboardCounts {
    books: i64,
    copies: i64,
    available: i64,
    authors: i64,
    genres: i64,
}

/// Fetch the dashboard and parse the five numeric counts
async fn dashboard_counts(client: &Client) -> DashboardCounts {
    let body = client
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    fn count_after(body: &str, label: &str) -> i64 {
        let start = body
            .find(label)
            .unwrap_or_else(|| panic!("{} not on dashboard", label))
            + label.len();
        let rest = body[start..].trim_start_matches("</strong>").trim_start();
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits
            .parse()
            .unwrap_or_else(|_| panic!("{} count is not a number", label))
    }

    DashboardCounts {
        books: count_after(&body, "Books:"),
        copies: count_after(&body, "Copies:"),
        available: count_after(&body, "Copies available:"),
        authors: count_after(&body, "Authors:"),
        genres: count_after(&body, "Genres:"),
    }
}

#[tokio::test]
#[ignore]
async fn test_dashboard_counts_track_collection_sizes() {
    let client = client();
    let before = dashboard_counts(&client).await;

    // 3 books, 2 copies (1 available, 1 loaned), 1 author, 1 genre
    let first_book = create_book(&client, "Bleak House").await;
    create_book(&client, "Little Dorrit").await;
    create_book(&client, "Our Mutual Friend").await;
    let book_id = id_of(&first_book);
    create_instance(&client, &book_id, "Bradbury and Evans, 1853", "Available").await;
    create_instance(&client, &book_id, "Chapman and Hall, 1868", "Loaned").await;
    post_form(
        &client,
        "/author/create",
        &[("first_name", "Charles"), ("last_name", "Dickens")],
    )
    .await;
    post_form(&client, "/genre/create", &[("name", "Serial Fiction")]).await;

    let after = dashboard_counts(&client).await;
    assert_eq!(after.books, before.books + 3);
    assert_eq!(after.copies, before.copies + 2);
    assert_eq!(after.available, before.available + 1);
    assert_eq!(after.authors, before.authors + 1);
    assert_eq!(after.genres, before.genres + 1);
}

#[tokio::test]
#[ignore]
async fn test_author_create_then_detail() {
    let client = client();

    let location = post_form(
        &client,
        "/author/create",
        &[
            ("first_name", "Jane"),
            ("last_name", "Austen"),
            ("date_of_birth", "1775-12-16"),
            ("date_of_death", "1817-07-18"),
        ],
    )
    .await;
    assert!(location.starts_with("/author/"));

    let detail = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request");
    assert!(detail.status().is_success());

    let body = detail.text().await.expect("Failed to read body");
    assert!(body.contains("Jane Austen"));
    assert!(body.contains("1775-12-16"));
}

#[tokio::test]
#[ignore]
async fn test_author_duplicate_create_redirects_to_same_detail() {
    let client = client();
    let form = [("first_name", "Henry"), ("last_name", "Fielding")];

    let first_location = post_form(&client, "/author/create", &form).await;
    let second_location = post_form(&client, "/author/create", &form).await;

    assert_eq!(first_location, second_location);
}

#[tokio::test]
#[ignore]
async fn test_author_create_with_short_first_name_rerenders_form() {
    let client = client();

    let response = client
        .post(format!("{}/author/create", BASE_URL))
        .form(&[("first_name", "Al"), ("last_name", "Hitchcock")])
        .send()
        .await
        .expect("Failed to send request");

    // Validation failures re-render the form, they do not redirect
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("First name must be between 3 and 100 characters."));
    // Sanitized values are kept in the re-rendered form
    assert!(body.contains(r#"value="Al""#));

    // Nothing was persisted
    let list = client
        .get(format!("{}/author", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(!list.contains("Hitchcock"));
}

#[tokio::test]
#[ignore]
async fn test_author_name_is_escaped_on_create() {
    let client = client();

    let location = post_form(
        &client,
        "/author/create",
        &[("first_name", "  Stephen  "), ("last_name", "King<script>")],
    )
    .await;

    let body = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    // Trimmed and escaped at the form boundary
    assert!(body.contains("Stephen King&lt;script&gt;"));
    assert!(!body.contains("King<script>"));
}

#[tokio::test]
#[ignore]
async fn test_book_create_with_single_genre_checkbox() {
    let client = client();

    let genre_location = post_form(&client, "/genre/create", &[("name", "Gothic Horror")]).await;
    let genre_id = id_of(&genre_location);

    // A single checked checkbox posts one scalar `genre` key; it must be
    // collected into a one-element genre list on the created book
    let location = post_form(
        &client,
        "/book/create",
        &[
            ("title", "The Castle of Otranto"),
            ("description", "A gothic story of usurpation and ruin."),
            ("isbn", "9780198704447"),
            ("author", ""),
            ("genre", &genre_id),
        ],
    )
    .await;
    assert!(location.starts_with("/book/"));

    let body = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("The Castle of Otranto"));
    assert!(body.contains("Gothic Horror"));
}

#[tokio::test]
#[ignore]
async fn test_book_form_rerender_keeps_genre_checked() {
    let client = client();

    let genre_location = post_form(&client, "/genre/create", &[("name", "Picaresque")]).await;
    let genre_id = id_of(&genre_location);

    let response = client
        .post(format!("{}/book/create", BASE_URL))
        .form(&[
            ("title", "X"),
            ("description", "An episodic tale of a roguish hero."),
            ("isbn", "9780140445893"),
            ("author", ""),
            ("genre", genre_id.as_str()),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Title must be between 3 and 100 characters."));
    // The previously selected genre checkbox comes back checked
    assert!(body.contains(&format!(r#"value="{}" checked"#, genre_id)));
}

#[tokio::test]
#[ignore]
async fn test_genre_delete_then_detail_falls_back_to_not_found() {
    let client = client();

    let location = post_form(&client, "/genre/create", &[("name", "Ephemeral Fiction")]).await;

    let deleted = client
        .post(format!("{}{}/delete", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), StatusCode::SEE_OTHER);
    assert_eq!(deleted.headers()["location"].to_str().unwrap(), "/genre");

    let detail = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request");
    assert!(detail.status().is_success());
    let body = detail.text().await.expect("Failed to read body");
    assert!(body.contains("Genre not found"));
}

#[tokio::test]
#[ignore]
async fn test_book_instance_rejects_unknown_status() {
    let client = client();

    let response = client
        .post(format!("{}/bookInstance/create", BASE_URL))
        .form(&[
            ("book", "1"),
            ("imprint", "First edition, 1998"),
            ("status", "Borrowed"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Status must be one of Available, Maintenance, Loaned or Reserved."));
}

#[tokio::test]
#[ignore]
async fn test_book_instance_update_with_unknown_status_applies_nothing() {
    let client = client();

    let book_location = create_book(&client, "Hard Times").await;
    let book_id = id_of(&book_location);
    let instance_location =
        create_instance(&client, &book_id, "Bradbury and Evans, 1854", "Available").await;

    let response = client
        .post(format!("{}{}/update", BASE_URL, instance_location))
        .form(&[
            ("book", book_id.as_str()),
            ("imprint", "Tampered imprint"),
            ("status", "Borrowed"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    // Rejected with a re-rendered form, not a redirect
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Status must be one of Available, Maintenance, Loaned or Reserved."));

    // The stored document is untouched: old imprint and status remain
    let detail = client
        .get(format!("{}{}", BASE_URL, instance_location))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(detail.contains("Bradbury and Evans, 1854"));
    assert!(!detail.contains("Tampered imprint"));
    assert!(detail.contains("Available"));
}

#[tokio::test]
#[ignore]
async fn test_update_form_redirects_to_list_for_unknown_id() {
    let client = client();

    let response = client
        .get(format!("{}/author/999999/update", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"].to_str().unwrap(), "/author");
}

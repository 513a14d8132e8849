mod common;

use common::{client, login, spawn_app};
use uuid::Uuid;

#[tokio::test]
async fn creating_an_article_requires_a_title() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    let response = client
        .post(format!("{}/api/admin/articles", app.address))
        .json(&serde_json::json!({"title": "  ", "body": "Some body"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "title is required");
}

#[tokio::test]
async fn article_lifecycle_draft_publish_delete() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    // Create: starts as a draft.
    let response = client
        .post(format!("{}/api/admin/articles", app.address))
        .json(&serde_json::json!({
            "title": "New treatment plant commissioned",
            "body": "The plant enters service next month.",
            "category": "news",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let article: serde_json::Value = response.json().await.unwrap();
    let id = article["id"].as_str().unwrap().to_string();
    assert_eq!(article["is_published"], false);
    assert!(article["author_id"].is_string());

    // Drafts are invisible to the public surface.
    let response = client
        .get(format!("{}/api/articles", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(listed.is_empty());

    let response = client
        .get(format!("{}/api/articles/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    // But visible to the admin listing.
    let response = client
        .get(format!("{}/api/admin/articles", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 1);

    // Publish via partial update.
    let response = client
        .put(format!("{}/api/admin/articles/{id}", app.address))
        .json(&serde_json::json!({"is_published": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: serde_json::Value = response.json().await.unwrap();
    assert_eq!(updated["is_published"], true);
    assert!(updated["published_at"].is_string());
    // Fields not in the payload are untouched.
    assert_eq!(updated["title"], "New treatment plant commissioned");

    // Now on the public surface.
    let response = client
        .get(format!("{}/api/articles/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Delete, then 404.
    let response = client
        .delete(format!("{}/api/admin/articles/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/api/admin/articles/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Article not found");
}

#[tokio::test]
async fn unknown_ids_are_404_with_the_resource_name() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    let id = Uuid::new_v4();
    for (path, resource) in [
        (format!("/api/admin/articles/{id}"), "Article"),
        (format!("/api/admin/testimonials/{id}"), "Testimonial"),
        (format!("/api/admin/vacancies/{id}"), "Vacancy"),
        (format!("/api/admin/tenders/{id}"), "Tender"),
        (format!("/api/admin/reports/{id}"), "Report"),
        (format!("/api/admin/staff/{id}"), "Staff profile"),
        (format!("/api/admin/galleries/{id}"), "Gallery"),
    ] {
        let response = client
            .get(format!("{}{}", app.address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404, "{path}");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], format!("{resource} not found"));
    }
}

#[tokio::test]
async fn subscriber_signup_normalizes_and_rejects_duplicates() {
    let app = spawn_app().await;
    let anon = client();

    let response = anon
        .post(format!("{}/api/subscribers", app.address))
        .json(&serde_json::json!({"email": "  Reader@Example.org "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let subscriber: serde_json::Value = response.json().await.unwrap();
    assert_eq!(subscriber["email"], "reader@example.org");

    // Same address, different casing: still a duplicate.
    let response = anon
        .post(format!("{}/api/subscribers", app.address))
        .json(&serde_json::json!({"email": "reader@example.org"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    // Admin sees and can remove the subscriber.
    let admin = client();
    login(&admin, &app).await;

    let response = admin
        .get(format!("{}/api/admin/subscribers", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 1);
    let id = listed[0]["id"].as_str().unwrap();

    let response = admin
        .delete(format!("{}/api/admin/subscribers/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn galleries_nest_their_images() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    let response = client
        .post(format!("{}/api/admin/galleries", app.address))
        .json(&serde_json::json!({"title": "Open day 2026"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let gallery: serde_json::Value = response.json().await.unwrap();
    let gallery_id = gallery["id"].as_str().unwrap().to_string();

    // Attaching to a nonexistent gallery is a 404, not an orphan row.
    let response = client
        .post(format!(
            "{}/api/admin/galleries/{}/images",
            app.address,
            Uuid::new_v4()
        ))
        .json(&serde_json::json!({"image_key": "galleries/xyz.jpg"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    for (key, order) in [("galleries/a.jpg", 2), ("galleries/b.jpg", 1)] {
        let response = client
            .post(format!(
                "{}/api/admin/galleries/{gallery_id}/images",
                app.address
            ))
            .json(&serde_json::json!({"image_key": key, "sort_order": order}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    // Public listing honors sort order.
    let response = client
        .get(format!(
            "{}/api/galleries/{gallery_id}/images",
            app.address
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let images: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["image_key"], "galleries/b.jpg");

    // Deleting the gallery removes its images with it.
    let response = client
        .delete(format!("{}/api/admin/galleries/{gallery_id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!(
            "{}/api/galleries/{gallery_id}/images",
            app.address
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn vacancy_and_tender_publication_filters() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    // Vacancies are open on creation and appear publicly at once.
    let response = client
        .post(format!("{}/api/admin/vacancies", app.address))
        .json(&serde_json::json!({
            "title": "Water quality engineer",
            "description": "Monitors treatment output.",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let vacancy: serde_json::Value = response.json().await.unwrap();
    let vacancy_id = vacancy["id"].as_str().unwrap().to_string();
    assert_eq!(vacancy["is_open"], true);

    let response = client
        .get(format!("{}/api/vacancies", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 1);

    // Closing it removes it from the public listing and detail.
    let response = client
        .put(format!("{}/api/admin/vacancies/{vacancy_id}", app.address))
        .json(&serde_json::json!({"is_open": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/vacancies", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(listed.is_empty());

    let response = client
        .get(format!("{}/api/vacancies/{vacancy_id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    // Tenders start unpublished and need an explicit publish.
    let response = client
        .post(format!("{}/api/admin/tenders", app.address))
        .json(&serde_json::json!({
            "title": "Pipeline rehabilitation, phase II",
            "description": "Sealed bids invited.",
            "reference_no": "T-2026-014",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let tender: serde_json::Value = response.json().await.unwrap();
    let tender_id = tender["id"].as_str().unwrap().to_string();

    let response = client
        .get(format!("{}/api/tenders", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(listed.is_empty());

    let response = client
        .put(format!("{}/api/admin/tenders/{tender_id}", app.address))
        .json(&serde_json::json!({"is_published": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/tenders", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["reference_no"], "T-2026-014");
}

#[tokio::test]
async fn dashboard_stats_track_content() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    // One draft article, one published; one open vacancy; one subscriber.
    let response = client
        .post(format!("{}/api/admin/articles", app.address))
        .json(&serde_json::json!({"title": "Draft", "body": "..."}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/api/admin/articles", app.address))
        .json(&serde_json::json!({"title": "Live", "body": "..."}))
        .send()
        .await
        .unwrap();
    let article: serde_json::Value = response.json().await.unwrap();
    let id = article["id"].as_str().unwrap();
    client
        .put(format!("{}/api/admin/articles/{id}", app.address))
        .json(&serde_json::json!({"is_published": true}))
        .send()
        .await
        .unwrap();

    client
        .post(format!("{}/api/admin/vacancies", app.address))
        .json(&serde_json::json!({"title": "Engineer", "description": "..."}))
        .send()
        .await
        .unwrap();

    client
        .post(format!("{}/api/subscribers", app.address))
        .json(&serde_json::json!({"email": "reader@example.org"}))
        .send()
        .await
        .unwrap();

    let response = client
        .get(format!("{}/api/admin/stats", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let stats: serde_json::Value = response.json().await.unwrap();
    assert_eq!(stats["total_articles"], 2);
    assert_eq!(stats["published_articles"], 1);
    assert_eq!(stats["open_vacancies"], 1);
    assert_eq!(stats["published_tenders"], 0);
    assert_eq!(stats["total_subscribers"], 1);
}

#[tokio::test]
async fn staff_and_testimonial_surfaces_round_trip() {
    let app = spawn_app().await;
    let client = client();
    login(&client, &app).await;

    // Staff profiles are published by default and ordered for display.
    for (name, order) in [("Amina Okafor", 2), ("Joseph Banda", 1)] {
        let response = client
            .post(format!("{}/api/admin/staff", app.address))
            .json(&serde_json::json!({
                "full_name": name,
                "position": "Engineer",
                "sort_order": order,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/api/staff", app.address))
        .send()
        .await
        .unwrap();
    let staff: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(staff.len(), 2);
    assert_eq!(staff[0]["full_name"], "Joseph Banda");

    // Testimonials require moderation before they appear.
    let response = client
        .post(format!("{}/api/admin/testimonials", app.address))
        .json(&serde_json::json!({
            "author_name": "A. Resident",
            "quote": "Service has improved enormously.",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let testimonial: serde_json::Value = response.json().await.unwrap();
    let id = testimonial["id"].as_str().unwrap();

    let response = client
        .get(format!("{}/api/testimonials", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert!(listed.is_empty());

    client
        .put(format!("{}/api/admin/testimonials/{id}", app.address))
        .json(&serde_json::json!({"is_published": true}))
        .send()
        .await
        .unwrap();

    let response = client
        .get(format!("{}/api/testimonials", app.address))
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 1);
}

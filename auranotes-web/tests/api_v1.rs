mod common;

use common::*;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn create_note_helper(client: &Client, address: &str, body: Value) -> Value {
    client
        .post(&format!("{}/api/v1/note", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("Failed to parse response")
}

async fn patch_note_helper(client: &Client, address: &str, id: &str, patch: Value) -> Value {
    client
        .patch(&format!("{}/api/v1/note/{}", address, id))
        .json(&patch)
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("Failed to parse response")
}

async fn get_json(client: &Client, url: String) -> Value {
    client
        .get(&url)
        .send()
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
async fn new_note() {
    let app = spawn_app().await;
    let client = Client::new();

    let note = create_note_helper(&client, &app.address, json!({})).await;
    assert!(note.is_object());
    assert_eq!(note["title"], "Untitled");
    assert_eq!(note["folder"], Value::Null);
    assert_eq!(note["priority"], "none");
    assert!(note["createdAt"].is_string());
    assert_eq!(note["createdAt"], note["updatedAt"]);

    let filed = create_note_helper(&client, &app.address, json!({"folder": "General"})).await;
    assert_eq!(filed["folder"], Value::Null);
    let filed = create_note_helper(&client, &app.address, json!({"folder": "Work"})).await;
    assert_eq!(filed["folder"], "Work");

    let response = client
        .post(&format!("{}/api/v1/note", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn note_retrieve_update_delete() {
    let app = spawn_app().await;
    let client = Client::new();

    let note = create_note_helper(&client, &app.address, json!({})).await;
    let id = note["id"].as_str().unwrap().to_owned();

    let got = get_json(&client, format!("{}/api/v1/note/{}", &app.address, id)).await;
    assert_eq!(got, note);

    let updated = patch_note_helper(
        &client,
        &app.address,
        &id,
        json!({
            "title": "Plan",
            "content": "alpha body",
            "priority": "high",
            "color": "default"
        }),
    )
    .await;
    assert_eq!(updated["title"], "Plan");
    assert_eq!(updated["content"], "alpha body");
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["color"], Value::Null);
    assert_eq!(updated["createdAt"], note["createdAt"]);
    assert_ne!(updated["updatedAt"], note["updatedAt"]);

    let revisions = get_json(
        &client,
        format!("{}/api/v1/note/{}/revision", &app.address, id),
    )
    .await;
    let revisions = revisions.as_array().unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0]["content"], "alpha body");
    assert_eq!(revisions[0]["noteId"], id.as_str());

    let response = client
        .delete(&format!("{}/api/v1/note/{}", &app.address, id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(&format!("{}/api/v1/note/{}", &app.address, id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(&format!("{}/api/v1/note/{}", &app.address, id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_note() {
    let app = spawn_app().await;
    let client = Client::new();

    let response = client
        .patch(&format!("{}/api/v1/note/nope", &app.address))
        .json(&json!({"title": "x"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(&format!("{}/api/v1/note/nope/revision", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_views() {
    let app = spawn_app().await;
    let client = Client::new();

    let work = create_note_helper(&client, &app.address, json!({"folder": "Work"})).await;
    let work_id = work["id"].as_str().unwrap();
    patch_note_helper(
        &client,
        &app.address,
        work_id,
        json!({"title": "Alpha launch"}),
    )
    .await;
    let urgent = create_note_helper(&client, &app.address, json!({})).await;
    let urgent_id = urgent["id"].as_str().unwrap();
    patch_note_helper(
        &client,
        &app.address,
        urgent_id,
        json!({"priority": "high"}),
    )
    .await;
    create_note_helper(&client, &app.address, json!({})).await;

    let all = get_json(&client, format!("{}/api/v1/note", &app.address)).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["id"], urgent_id);

    let in_work = get_json(&client, format!("{}/api/v1/note?folder=Work", &app.address)).await;
    let in_work = in_work.as_array().unwrap();
    assert_eq!(in_work.len(), 1);
    assert_eq!(in_work[0]["id"], work_id);

    let found = get_json(&client, format!("{}/api/v1/note?search=ALPHA", &app.address)).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], work_id);

    let recent = get_json(&client, format!("{}/api/v1/note?recent=true", &app.address)).await;
    assert_eq!(recent.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn due_notes() {
    let app = spawn_app().await;
    let client = Client::new();

    let note = create_note_helper(&client, &app.address, json!({})).await;
    let id = note["id"].as_str().unwrap();
    patch_note_helper(
        &client,
        &app.address,
        id,
        json!({"reminderAt": "2020-01-01T09:00:00Z"}),
    )
    .await;
    create_note_helper(&client, &app.address, json!({})).await;

    let due = get_json(&client, format!("{}/api/v1/due", &app.address)).await;
    let due = due.as_array().unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0]["id"], id);

    let due = get_json(
        &client,
        format!("{}/api/v1/due?asOf=2019-06-01T00:00:00Z", &app.address),
    )
    .await;
    assert!(due.as_array().unwrap().is_empty());

    // 01:00 UTC on the 16th is still the evening of the 15th at UTC-5
    patch_note_helper(
        &client,
        &app.address,
        id,
        json!({"reminderAt": "2025-06-16T01:00:00Z"}),
    )
    .await;
    let due = get_json(
        &client,
        format!("{}/api/v1/due?asOf=2025-06-15T18:00:00-05:00", &app.address),
    )
    .await;
    assert_eq!(due.as_array().unwrap().len(), 1);
    let due = get_json(
        &client,
        format!("{}/api/v1/due?asOf=2025-06-15T23:00:00Z", &app.address),
    )
    .await;
    assert!(due.as_array().unwrap().is_empty());

    let cleared = patch_note_helper(&client, &app.address, id, json!({"reminderAt": null})).await;
    assert_eq!(cleared["reminderAt"], Value::Null);
}

#[tokio::test]
async fn folders() {
    let app = spawn_app().await;
    let client = Client::new();

    let folders = get_json(&client, format!("{}/api/v1/folder", &app.address)).await;
    assert_eq!(folders, json!(["Personal", "Work", "Ideas"]));

    let response = client
        .post(&format!("{}/api/v1/folder", &app.address))
        .json(&json!({"name": "Travel"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
    let response = client
        .post(&format!("{}/api/v1/folder/subfolder", &app.address))
        .json(&json!({"parent": "Travel", "name": "Japan"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);

    let children = get_json(
        &client,
        format!("{}/api/v1/folder/children?path=Travel", &app.address),
    )
    .await;
    assert_eq!(children, json!(["Travel/Japan"]));

    let tree = get_json(&client, format!("{}/api/v1/folder/tree", &app.address)).await;
    let travel = tree
        .as_array()
        .unwrap()
        .iter()
        .find(|n| n["name"] == "Travel")
        .unwrap();
    assert_eq!(travel["children"][0]["fullPath"], "Travel/Japan");

    let response = client
        .post(&format!("{}/api/v1/folder", &app.address))
        .json(&json!({"name": "General"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let note = create_note_helper(&client, &app.address, json!({"folder": "Travel/Japan"})).await;
    let id = note["id"].as_str().unwrap();

    let renamed = client
        .post(&format!("{}/api/v1/folder/rename", &app.address))
        .json(&json!({"old": "Travel", "new": "Trips"}))
        .send()
        .await
        .expect("Failed to execute request.")
        .json::<Value>()
        .await
        .expect("Failed to parse response");
    let renamed = renamed.as_array().unwrap();
    assert!(renamed.contains(&json!("Trips/Japan")));
    assert!(!renamed.contains(&json!("Travel")));
    let moved = get_json(&client, format!("{}/api/v1/note/{}", &app.address, id)).await;
    assert_eq!(moved["folder"], "Trips/Japan");

    let response = client
        .post(&format!("{}/api/v1/folder/rename", &app.address))
        .json(&json!({"old": "Trips", "new": "Work"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .post(&format!("{}/api/v1/folder", &app.address))
        .json(&json!({"name": "a/b"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(&format!("{}/api/v1/folder/subfolder", &app.address))
        .json(&json!({"parent": "Nowhere", "name": "x"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(&format!("{}/api/v1/folder?path=Trips", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
    let moved = get_json(&client, format!("{}/api/v1/note/{}", &app.address, id)).await;
    assert_eq!(moved["folder"], Value::Null);
    let folders = get_json(&client, format!("{}/api/v1/folder", &app.address)).await;
    assert_eq!(folders, json!(["Personal", "Work", "Ideas"]));
}

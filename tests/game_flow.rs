mod support;

use serde_json::Value;

async fn get_json(url: String) -> Value {
    reqwest::get(url)
        .await
        .expect("request should succeed")
        .json()
        .await
        .expect("response should be json")
}

#[tokio::test]
async fn state_reports_the_full_roster() {
    let base_url = support::ensure_server();
    let state = get_json(format!("{base_url}/state")).await;

    assert_eq!(state["grid_size"], serde_json::json!([12, 10]));
    assert_eq!(state["end_game_turns"], 50);

    let engineers = state["engineers"].as_array().expect("engineers array");
    assert_eq!(engineers.len(), 10);
    let names: Vec<&str> = engineers
        .iter()
        .map(|e| e["name"].as_str().expect("engineer name"))
        .collect();
    assert!(names.contains(&"Leeroy"));
    assert!(names.contains(&"rapid ryan"));
    assert!(names.contains(&"Leprechaun"));

    // The beast always reports a target slot, chasing or not.
    assert!(state["pursuer_targets"].get("Beast").is_some());
}

#[tokio::test]
async fn update_ticks_and_returns_the_snapshot() {
    let base_url = support::ensure_server();
    let response = get_json(format!("{base_url}/update")).await;

    assert!(response["update_occurred"].is_boolean());
    assert!(response["turn_counter"].is_u64());
    assert!(response["engineers"].is_array());

    // Unthrottled test server: polls advance the simulation.
    let mut advanced = false;
    for _ in 0..5 {
        let response = get_json(format!("{base_url}/update")).await;
        if response["update_occurred"] == true {
            advanced = true;
            break;
        }
    }
    assert!(advanced, "no poll produced an update");
}

#[tokio::test]
async fn the_beast_is_withheld_while_hidden() {
    let base_url = support::ensure_server();
    let state = get_json(format!("{base_url}/state")).await;

    // Invariant regardless of how far other tests advanced the game:
    // a hidden beast never exposes its position, a visible one does.
    if state["beast_hidden"] == true {
        assert!(state["beast"].is_null());
    }
    if state["game_over"] == false && state["beast_hidden"] == false {
        assert!(state["beast"].is_object());
    }
}

#[tokio::test]
async fn reset_rebuilds_a_fresh_game() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let state: Value = client
        .post(format!("{base_url}/reset"))
        .send()
        .await
        .expect("reset should succeed")
        .json()
        .await
        .expect("reset response should be json");

    assert_eq!(state["turn_counter"], 0);
    assert_eq!(state["game_over"], false);
    assert_eq!(state["beast_hidden"], true);
    assert!(state["beast"].is_null());
    assert_eq!(state["capture_order"], serde_json::json!([]));
    assert_eq!(state["current_turn_entity"], "Beast");
}

//! Exercises the server over a real socket.
//!
//! Starts the server on a random port in a background thread, then talks to
//! it with ureq so the `Host`-derived links and the `Location` header are
//! checked end-to-end.

use std::sync::Arc;

use todo_core::TodoStore;
use todo_server::AppState;

fn spawn_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let state = AppState::new(Arc::new(TodoStore::seeded()));
            todo_server::run(listener, state, std::future::pending()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn get_json(agent: &ureq::Agent, url: &str) -> (u16, serde_json::Value) {
    let mut response = agent.get(url).call().expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap();
    (status, serde_json::from_str(&body).unwrap())
}

#[test]
fn seed_create_and_read_over_http() {
    let base = spawn_server();
    let agent = agent();

    // Step 1: seeded list for Jack.
    let (status, body) = get_json(&agent, &format!("{base}/users/Jack/todos"));
    assert_eq!(status, 200);
    let list = body["_embedded"]["todoList"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["desc"], "Learn Spring Boot");
    assert_eq!(
        body["_links"]["self"]["href"],
        format!("{base}/users/Jack/todos")
    );

    // Step 2: unknown id is a client error with the fixed body.
    let (status, body) = get_json(&agent, &format!("{base}/users/Jack/todos/99"));
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Todo Not Found");

    // Step 3: create for Jill.
    let response = agent
        .post(&format!("{base}/users/Jill/todos"))
        .content_type("application/json")
        .send(r#"{"desc":"Learn Spring WebFlux","done":false}"#.as_bytes())
        .expect("HTTP transport error");
    assert_eq!(response.status().as_u16(), 201);
    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(location, format!("{base}/users/Jill/todos/4"));

    // Step 4: follow the location.
    let (status, body) = get_json(&agent, &location);
    assert_eq!(status, 200);
    assert_eq!(body["id"], 4);
    assert_eq!(body["_links"]["self"]["href"], location);

    // Step 5: Jill now has two items, in creation order.
    let (_, body) = get_json(&agent, &format!("{base}/users/Jill/todos"));
    let ids: Vec<u64> = body["_embedded"]["todoList"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4]);
}

//! Helpers shared by the launcher integration tests.

#![allow(dead_code)]

use axum::Router;

/// Serve `router` on a random port from its own thread and return the base URL.
pub fn serve(router: Router) -> String {
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
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Start the mock users service with `users` and return its base URL.
pub fn start_mock_server(token: &str, users: Vec<mock_server::User>) -> String {
    serve(mock_server::app(token, users))
}

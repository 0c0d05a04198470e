mod common;

#[tokio::test]
async fn status_endpoint_reports_liveness() {
    let env = common::TestEnv::new(vec![], "");
    let server = env.server();

    let response = server.get("/status").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "Bot is running!");
}

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use bowling_league::service::password::hash_password;
use bowling_league::{Config, LeagueState, LeagueStorage, league_router};
use tower::ServiceExt;

const USERNAME: &str = "admin";
const PASSWORD: &str = "strike";

/// Router plus the session cookie a browser would carry between requests.
struct TestClient {
    app: Router,
    storage: LeagueStorage,
    cookie: Option<String>,
}

impl TestClient {
    async fn new() -> Self {
        let storage = bowling_league::db::connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory db");
        let hashed = hash_password(PASSWORD).expect("failed to hash password");
        storage
            .upsert_user(USERNAME, &hashed)
            .await
            .expect("failed to seed user");

        let cfg = Config {
            insecure_cookie: true,
            ..Config::default()
        };
        let app = league_router(LeagueState::new(storage.clone(), &cfg));
        Self {
            app,
            storage,
            cookie: None,
        }
    }

    async fn signed_in() -> Self {
        let mut client = Self::new().await;
        let resp = client
            .post("/users/signin", &[("username", USERNAME), ("password", PASSWORD)])
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        // consume the welcome flash
        client.get(location(&resp)).await;
        client
    }

    async fn send(&mut self, req: Request<Body>) -> Response {
        let resp = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("request failed");
        if let Some(set_cookie) = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            && let Some(pair) = set_cookie.split(';').next()
        {
            self.cookie = Some(pair.to_string());
        }
        resp
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn get(&mut self, uri: &str) -> Response {
        let req = self
            .request("GET", uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.send(req).await
    }

    async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("failed to build request");
        self.send(req).await
    }

    /// Follow a redirect and return the rendered page.
    async fn follow(&mut self, resp: &Response) -> String {
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let target = location(resp).to_string();
        let page = self.get(&target).await;
        assert_eq!(page.status(), StatusCode::OK, "GET {target}");
        body_string(page).await
    }
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("missing location header")
}

async fn body_string(resp: Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

#[tokio::test]
async fn signed_out_request_resumes_target_after_signin() {
    let mut client = TestClient::new().await;

    let resp = client.get("/teams/page/1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users/signin");

    let page = client.follow(&resp).await;
    assert!(page.contains("You must be signed in to do that."));

    let resp = client
        .post("/users/signin", &[("username", USERNAME), ("password", PASSWORD)])
        .await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("Welcome to the app, admin!"));
}

#[tokio::test]
async fn signin_resumes_deeper_target_path() {
    let mut client = TestClient::new().await;
    let team_id = client.storage.create_team("Strikers").await.unwrap();

    let target = format!("/teams/{team_id}/edit");
    client.get(&target).await;
    let resp = client
        .post("/users/signin", &[("username", USERNAME), ("password", PASSWORD)])
        .await;
    assert_eq!(location(&resp), target);
}

#[tokio::test]
async fn invalid_credentials_rerender_with_422() {
    let mut client = TestClient::new().await;

    let resp = client
        .post("/users/signin", &[("username", USERNAME), ("password", "gutter")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_string(resp).await;
    assert!(page.contains("Invalid credentials"));

    let resp = client
        .post("/users/signin", &[("username", "nobody"), ("password", PASSWORD)])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = client.get("/teams/page/1").await;
    assert_eq!(location(&resp), "/users/signin");
}

#[tokio::test]
async fn signout_clears_session() {
    let mut client = TestClient::signed_in().await;

    let resp = client.post("/users/signout", &[]).await;
    assert_eq!(location(&resp), "/users/signin");
    let page = client.follow(&resp).await;
    assert!(page.contains("You have been signed out."));

    let resp = client.get("/teams/page/1").await;
    assert_eq!(location(&resp), "/users/signin");
}

#[tokio::test]
async fn create_player_redirects_with_success() {
    let mut client = TestClient::signed_in().await;
    let team_id = client.storage.create_team("Strikers").await.unwrap();
    assert_eq!(team_id, 1);

    let resp = client
        .post(
            "/teams/1/players",
            &[("player_name", "Al"), ("points", "250")],
        )
        .await;
    assert_eq!(location(&resp), "/teams/1/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("The player Al has joined the team!"));
    assert!(page.contains("250 points"));

    let players = client.storage.team_players(1).await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].points, 250);
}

#[tokio::test]
async fn invalid_points_rerender_team_page_without_insert() {
    let mut client = TestClient::signed_in().await;
    client.storage.create_team("Strikers").await.unwrap();

    let resp = client
        .post(
            "/teams/1/players",
            &[("player_name", "Al"), ("points", "bad")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("Points entered have to be a valid integer!"));
    assert!(page.contains("Strikers"));

    let resp = client
        .post(
            "/teams/1/players",
            &[("player_name", "Al"), ("points", "3001")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("between 0 and 3000 points"));

    let resp = client
        .post(
            "/teams/1/players",
            &[("player_name", "Al"), ("points", "99999999999999999999")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("between 0 and 3000 points"));
    assert!(!page.contains("have to be a valid integer"));

    assert!(client.storage.team_players(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn player_on_unknown_team_is_rejected() {
    let mut client = TestClient::signed_in().await;

    let resp = client
        .post(
            "/teams/42/players",
            &[("player_name", "Al"), ("points", "250")],
        )
        .await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("The specified team was not found."));
}

#[tokio::test]
async fn out_of_bounds_page_redirects_to_league() {
    let mut client = TestClient::signed_in().await;
    for name in ["A", "B", "C"] {
        client.storage.create_team(name).await.unwrap();
    }

    let resp = client.get("/teams/page/5").await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("Uh oh! That was an out of bounds page number"));

    let resp = client.get("/teams/page/0").await;
    assert_eq!(location(&resp), "/teams/page/1");
    let resp = client.get("/teams/page/two").await;
    assert_eq!(location(&resp), "/teams/page/1");
}

#[tokio::test]
async fn league_pages_hold_three_teams() {
    let mut client = TestClient::signed_in().await;
    for name in ["A", "B", "C", "D"] {
        client.storage.create_team(name).await.unwrap();
    }

    let resp = client.get("/teams/page/2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains(r#"href="/teams/4/page/1""#));
    assert!(!page.contains(r#"href="/teams/1/page/1""#));
    assert!(page.contains(r#"href="/teams/page/1">Previous"#));
    assert!(!page.contains("Next"));
}

#[tokio::test]
async fn delete_team_always_succeeds() {
    let mut client = TestClient::signed_in().await;
    for i in 1..=7 {
        client.storage.create_team(&format!("Team {i}")).await.unwrap();
    }
    client.storage.create_player(7, "Al", 100).await.unwrap();

    let resp = client.post("/teams/7/delete", &[]).await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("The team has been deleted."));
    assert!(client.storage.team_info(7).await.unwrap().is_none());
    assert!(client.storage.team_players(7).await.unwrap().is_empty());

    let resp = client.post("/teams/99/delete", &[]).await;
    assert_eq!(location(&resp), "/teams/page/1");
}

#[tokio::test]
async fn team_names_must_be_unique() {
    let mut client = TestClient::signed_in().await;

    let resp = client.post("/teams", &[("team_name", "Pinheads")]).await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("The team Pinheads has joined the league!"));

    let resp = client.post("/teams", &[("team_name", " Pinheads ")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("This team name already exists, new name must be unique!"));

    let resp = client.post("/teams", &[("team_name", "")]).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = body_string(resp).await;
    assert!(page.contains("Name must be between 1 and 50 characters long!"));

    assert_eq!(client.storage.league_teams().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rename_team() {
    let mut client = TestClient::signed_in().await;
    let a = client.storage.create_team("Pinheads").await.unwrap();
    client.storage.create_team("Rollers").await.unwrap();

    let resp = client.get(&format!("/teams/{a}/edit")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains(r#"value="Pinheads""#));

    // keeping its own name is not a conflict
    let resp = client
        .post(&format!("/teams/{a}"), &[("team_name", "Pinheads")])
        .await;
    assert_eq!(location(&resp), "/teams/page/1");

    let resp = client
        .post(&format!("/teams/{a}"), &[("team_name", "Rollers")])
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        body_string(resp)
            .await
            .contains("This team name already exists")
    );

    let resp = client
        .post(&format!("/teams/{a}"), &[("team_name", "Spares")])
        .await;
    let page = client.follow(&resp).await;
    assert!(page.contains("The team name has been updated to Spares."));
    assert_eq!(
        client.storage.team_info(a).await.unwrap().unwrap().name,
        "Spares"
    );
}

#[tokio::test]
async fn edit_update_and_delete_player() {
    let mut client = TestClient::signed_in().await;
    let team = client.storage.create_team("Strikers").await.unwrap();
    let other = client.storage.create_team("Rollers").await.unwrap();
    let player = client.storage.create_player(team, "Al", 100).await.unwrap();

    let resp = client
        .get(&format!("/teams/{team}/players/{player}/edit"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_string(resp).await.contains(r#"value="100""#));

    let resp = client
        .get(&format!("/teams/{other}/players/{player}/edit"))
        .await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("The specified player was not found."));

    let long_name = "x".repeat(51);
    let resp = client
        .post(
            &format!("/teams/{team}/players/{player}"),
            &[("player_name", long_name.as_str()), ("points", "300")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        body_string(resp)
            .await
            .contains("Name must be between 1 and 50 characters long!")
    );

    let resp = client
        .post(
            &format!("/teams/{team}/players/{player}"),
            &[("player_name", "Alan"), ("points", "300")],
        )
        .await;
    assert_eq!(location(&resp), format!("/teams/{team}/page/1"));
    let page = client.follow(&resp).await;
    assert!(page.contains("Player is now named Alan with 300 points."));

    let resp = client
        .post(&format!("/teams/{team}/players/{player}/delete"), &[])
        .await;
    assert_eq!(location(&resp), format!("/teams/{team}/page/1"));
    let page = client.follow(&resp).await;
    assert!(page.contains("The player has been deleted."));
    assert!(client.storage.team_players(team).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_player_through_another_team_leaves_it_in_place() {
    let mut client = TestClient::signed_in().await;
    let team = client.storage.create_team("Strikers").await.unwrap();
    let other = client.storage.create_team("Rollers").await.unwrap();
    let player = client.storage.create_player(team, "Al", 100).await.unwrap();

    let resp = client
        .post(&format!("/teams/{other}/players/{player}/delete"), &[])
        .await;
    assert_eq!(location(&resp), format!("/teams/{other}/page/1"));

    let roster = client.storage.team_players(team).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, player);
}

#[tokio::test]
async fn unmatched_routes_flash_and_go_home() {
    let mut client = TestClient::signed_in().await;

    let resp = client.get("/bowling-alley").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let home = client.get("/").await;
    assert_eq!(location(&home), "/teams/page/1");
    let page = client.follow(&home).await;
    assert!(page.contains("The page you were looking for couldn't be found!"));

    // known path, wrong method
    let resp = client.get("/teams").await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn unknown_team_page_redirects_to_league() {
    let mut client = TestClient::signed_in().await;

    let resp = client.get("/teams/abc/page/1").await;
    assert_eq!(location(&resp), "/teams/page/1");
    let page = client.follow(&resp).await;
    assert!(page.contains("The specified team was not found."));
}

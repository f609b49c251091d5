/// Payload parsing and window bookkeeping.
#[cfg(test)]
mod unit {
    use crate::client::page_window;
    use crate::types::{Actor, GenreList, Movie, Page};
    use crate::RecentActors;

    #[test]
    fn parse_movie_page() {
        let json = r#"{
            "page": 4,
            "total_pages": 44,
            "results": [
                {"id": 1, "title": "Heat", "overview": "Cops.", "poster_path": "/heat.jpg",
                 "release_date": "1995-12-15", "vote_average": 8.3, "genre_ids": [80, 18]},
                {"id": 2, "title": "No Poster", "poster_path": null},
                {"id": 3, "title": "Blank Poster", "poster_path": "   "}
            ]
        }"#;
        let page: Page<Movie> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages_or(1), 44);
        let with_posters: Vec<_> = page.results.iter().filter(|m| m.has_poster()).collect();
        assert_eq!(with_posters.len(), 1);
        assert_eq!(with_posters[0].title, "Heat");
    }

    #[test]
    fn missing_total_pages_uses_fallback() {
        let page: Page<Movie> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(page.total_pages_or(1), 1);
        let page: Page<Movie> = serde_json::from_str(r#"{"total_pages": 0}"#).unwrap();
        assert_eq!(page.total_pages_or(500), 500);
    }

    #[test]
    fn parse_actor_with_known_for() {
        let json = r#"{
            "id": 287, "name": "Brad Pitt", "profile_path": "/brad.jpg",
            "known_for_department": "Acting", "popularity": 40.1,
            "known_for": [{"id": 550, "title": "Fight Club", "media_type": "movie"}]
        }"#;
        let actor: Actor = serde_json::from_str(json).unwrap();
        assert!(actor.has_profile());
        assert_eq!(actor.known_for[0].title.as_deref(), Some("Fight Club"));
    }

    #[test]
    fn parse_genres() {
        let list: GenreList =
            serde_json::from_str(r#"{"genres": [{"id": 28, "name": "Action"}]}"#).unwrap();
        assert_eq!(list.genres[0].name, "Action");
    }

    #[test]
    fn page_window_clamps_to_available_pages() {
        assert_eq!(page_window(3, 50, 500), 3..=50);
        assert_eq!(page_window(3, 50, 10), 3..=10);
        assert_eq!(page_window(3, 50, 2), 2..=2);
        assert_eq!(page_window(75, 150, 60), 60..=60);
        assert_eq!(page_window(2, 5, 0), 1..=1);
    }

    #[test]
    fn recent_window_evicts_oldest() {
        let mut recent = RecentActors::new(3);
        for id in 1..=4 {
            recent.record(id);
        }
        assert_eq!(recent.len(), 3);
        assert!(!recent.contains(1));
        assert!(recent.contains(4));

        recent.record(2);
        assert_eq!(recent.len(), 3, "re-recording does not grow the window");
    }
}

/// Requests against a mock TMDb.
#[cfg(test)]
mod http {
    use crate::{TmdbClient, TmdbError};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> TmdbClient {
        TmdbClient::new(Some("test-key".into()))
            .with_base_url(server.uri())
            .with_seed(7)
    }

    fn actor(id: u64, profile: Option<&str>) -> serde_json::Value {
        json!({ "id": id, "name": format!("Actor {id}"), "profile_path": profile })
    }

    #[tokio::test]
    async fn missing_key_never_calls_out() {
        let client = TmdbClient::new(None);
        assert!(!client.is_configured());
        let err = client.genres().await.unwrap_err();
        assert!(matches!(err, TmdbError::NotConfigured));
        assert_eq!(err.to_string(), "TMDb API key not configured");
        assert!(matches!(
            client.random_movie().await,
            Err(TmdbError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn genres_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/genre/movie/list"))
            .and(query_param("api_key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"genres": [{"id": 35, "name": "Comedy"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let genres = client(&server).genres().await.unwrap();
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].name, "Comedy");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/genre/movie/list"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"status_code": 7, "status_message": "Invalid API key"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).genres().await.unwrap_err();
        match err {
            TmdbError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    async fn mock_all_movie_lists(server: &MockServer, body: serde_json::Value) {
        for list in ["/movie/popular", "/movie/now_playing", "/movie/top_rated"] {
            Mock::given(method("GET"))
                .and(path(list))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn random_movie_only_returns_movies_with_posters() {
        let server = MockServer::start().await;
        let body = json!({
            "page": 1,
            "total_pages": 1,
            "results": [
                {"id": 1, "title": "Blank", "poster_path": ""},
                {"id": 2, "title": "Jaws", "poster_path": "/jaws.jpg"},
                {"id": 3, "title": "Null", "poster_path": null}
            ]
        });
        mock_all_movie_lists(&server, body).await;

        let movie = client(&server).random_movie().await.unwrap();
        assert_eq!(movie.title, "Jaws");
    }

    #[tokio::test]
    async fn random_movie_gives_up_after_retries() {
        let server = MockServer::start().await;
        let body = json!({"page": 1, "total_pages": 1, "results": [{"id": 1, "title": "Blank"}]});
        mock_all_movie_lists(&server, body).await;

        let err = client(&server).random_movie().await.unwrap_err();
        assert!(matches!(err, TmdbError::NoResults(_)));
    }

    #[tokio::test]
    async fn popular_actors_dedupes_and_remembers() {
        let server = MockServer::start().await;
        let body = json!({
            "page": 1,
            "total_pages": 1,
            "results": [
                actor(1, Some("/a.jpg")),
                actor(2, Some("/b.jpg")),
                actor(3, None),
                actor(4, Some("/d.jpg")),
                actor(5, Some("/e.jpg")),
                actor(6, Some(" "))
            ]
        });
        Mock::given(method("GET"))
            .and(path("/person/popular"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(8)
            .mount(&server)
            .await;

        let client = client(&server);
        let first = client.popular_actors().await.unwrap();
        let mut ids: Vec<u64> = first.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 4, 5], "every photographed actor once");

        let second = client.popular_actors().await.unwrap();
        assert!(second.is_empty(), "recently shown actors are skipped");
    }

    #[tokio::test]
    async fn failed_actor_tier_is_skipped() {
        let server = MockServer::start().await;
        let body = json!({
            "page": 1,
            "total_pages": 200,
            "results": (1..=6).map(|id| actor(id, Some("/p.jpg"))).collect::<Vec<_>>()
        });
        Mock::given(method("GET"))
            .and(path("/person/popular"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/person/popular"))
            .respond_with(ResponseTemplate::new(500).set_body_string("tier down"))
            .up_to_n_times(1)
            .with_priority(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/person/popular"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .with_priority(3)
            .mount(&server)
            .await;

        let actors = client(&server).popular_actors().await.unwrap();
        assert_eq!(actors.len(), 6, "two tiers of three");
    }

    #[tokio::test]
    async fn failed_first_page_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/person/popular"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let err = client(&server).popular_actors().await.unwrap_err();
        assert!(matches!(err, TmdbError::Status { status: 503, .. }));
    }
}

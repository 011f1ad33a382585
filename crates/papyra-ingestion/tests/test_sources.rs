//! Source client tests against a local mock server.

use httpmock::prelude::*;

use papyra_common::article::ArticleSource;
use papyra_ingestion::sources::arxiv::ArxivClient;
use papyra_ingestion::sources::europepmc::EuropePmcClient;
use papyra_ingestion::sources::ieee::IeeeClient;
use papyra_ingestion::sources::LiteratureSource;
use secrecy::SecretString;

#[tokio::test]
async fn arxiv_maps_atom_entries() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/query")
            .query_param("search_query", "all:test_keywords")
            .query_param("max_results", "2");
        then.status(200).body(
            "<feed><entry><id>test_id</id><title>Test Title</title>\
             <summary>Test Summary</summary></entry></feed>",
        );
    });

    let client = ArxivClient::new().with_base_url(format!("{}/api/query", server.base_url()));
    let articles = client.search("test_keywords", 2).await.unwrap();

    mock.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, ArticleSource::Arxiv);
    assert_eq!(articles[0].title, "Test Title");
    assert_eq!(articles[0].content, "Test Summary");
    assert_eq!(articles[0].url.as_deref(), Some("test_id"));
}

#[tokio::test]
async fn arxiv_non_200_yields_empty_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/query");
        then.status(503);
    });

    let client = ArxivClient::new().with_base_url(format!("{}/api/query", server.base_url()));
    let articles = client.search("x", 2).await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn europepmc_maps_json_results() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("query", "test_keywords")
            .query_param("format", "json")
            .query_param("pageSize", "2");
        then.status(200).json_body(serde_json::json!({
            "resultList": {
                "result": [{
                    "title": "Test Title",
                    "abstractText": "Test Abstract",
                    "doi": "10.1000/test",
                    "authorString": "Test Author",
                    "journalTitle": "Test Journal",
                    "pubYear": "2024"
                }]
            }
        }));
    });

    let client = EuropePmcClient::new().with_base_url(format!("{}/search", server.base_url()));
    let articles = client.search("test_keywords", 2).await.unwrap();

    mock.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, ArticleSource::EuropePmc);
    assert_eq!(articles[0].content, "Test Abstract");
    assert_eq!(articles[0].doi.as_deref(), Some("10.1000/test"));
}

#[tokio::test]
async fn europepmc_empty_result_list_is_ok() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(200).json_body(serde_json::json!({"resultList": {"result": []}}));
    });

    let client = EuropePmcClient::new().with_base_url(format!("{}/search", server.base_url()));
    let articles = client.search("x", 2).await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn ieee_sends_key_and_maps_articles() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/articles")
            .query_param("apikey", "test_ieee_api_key")
            .query_param("querytext", "test_keywords")
            .query_param("start_record", "1")
            .query_param("sort_field", "article_number");
        then.status(200).json_body(serde_json::json!({
            "articles": [{"title": "Test Title", "abstract": "Test Abstract"}]
        }));
    });

    let client = IeeeClient::new(Some(SecretString::from("test_ieee_api_key".to_string())))
        .with_base_url(format!("{}/articles", server.base_url()));
    let articles = client.search("test_keywords", 2).await.unwrap();

    mock.assert();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source, ArticleSource::IeeeXplore);
    assert_eq!(articles[0].title, "Test Title");
    assert_eq!(articles[0].content, "Test Abstract");
}

#[tokio::test]
async fn ieee_rejection_yields_empty_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/articles");
        then.status(403);
    });

    let client = IeeeClient::new(None)
        .with_base_url(format!("{}/articles", server.base_url()));
    let articles = client.search("x", 2).await.unwrap();
    assert!(articles.is_empty());
}

//! Allocation properties of the link service over the in-memory store.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use shortlink::application::services::{CodeSettings, LinkService};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::MemoryUrlRepository;
use shortlink::utils::code_generator::RandomCodeGenerator;

use common::{FixedGenerator, ScriptedGenerator, seed_link};

#[tokio::test]
async fn test_allocate_returns_code_of_configured_length() {
    let repo = MemoryUrlRepository::shared();
    let service = LinkService::new(repo, Arc::new(RandomCodeGenerator::new()));

    let link = service
        .create_short_link(1, "https://example.com")
        .await
        .unwrap();

    assert_eq!(link.code.len(), 7);
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.click_count, 0);
    assert!(!link.disabled);
}

#[tokio::test]
async fn test_concurrent_allocations_never_share_a_code() {
    let repo = MemoryUrlRepository::shared();
    let service = Arc::new(LinkService::new(
        repo.clone(),
        Arc::new(RandomCodeGenerator::new()),
    ));

    let mut handles = Vec::new();
    for i in 0..50 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service
                .create_short_link(1, &format!("https://example.com/{i}"))
                .await
                .unwrap()
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap();
        assert!(codes.insert(link.code), "two links share a code");
    }

    assert_eq!(repo.len(), 50);
}

#[tokio::test]
async fn test_allocate_retries_once_on_collision() {
    let repo = MemoryUrlRepository::shared();
    seed_link(&repo, 1, "taken11", "https://first.example.com").await;

    let generator = Arc::new(ScriptedGenerator::new(&["taken11", "fresh22"]));
    let service = LinkService::new(repo.clone(), generator);

    let link = service
        .create_short_link(2, "https://second.example.com")
        .await
        .unwrap();

    assert_eq!(link.code, "fresh22");
    // Exactly one new row next to the seeded one.
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_allocate_exhausts_after_max_attempts() {
    let repo = MemoryUrlRepository::shared();
    seed_link(&repo, 1, "taken11", "https://first.example.com").await;

    let generator = Arc::new(FixedGenerator::new("taken11"));
    let settings = CodeSettings {
        code_length: 7,
        max_attempts: 5,
    };
    let service = LinkService::with_settings(repo.clone(), generator.clone(), settings);

    let result = service
        .create_short_link(2, "https://second.example.com")
        .await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::AllocationExhausted { attempts: 5 }
    ));
    assert_eq!(generator.calls(), 5);
    // No partial row was persisted.
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_allocate_rejects_invalid_target_url() {
    let repo = MemoryUrlRepository::shared();
    let service = LinkService::new(repo.clone(), Arc::new(RandomCodeGenerator::new()));

    for bad in ["", "not-a-url", "ftp://example.com", "javascript:alert(1)"] {
        let result = service.create_short_link(1, bad).await;
        assert!(
            matches!(result.unwrap_err(), AppError::InvalidTargetUrl(_)),
            "expected rejection for {bad:?}"
        );
    }

    // Validation failures never reach the store.
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_list_owner_links_newest_first() {
    let repo = MemoryUrlRepository::shared();
    seed_link(&repo, 1, "aaa1111", "https://example.com/a").await;
    seed_link(&repo, 2, "other11", "https://example.com/x").await;
    seed_link(&repo, 1, "bbb2222", "https://example.com/b").await;
    seed_link(&repo, 1, "ccc3333", "https://example.com/c").await;

    let service = LinkService::new(repo, Arc::new(RandomCodeGenerator::new()));

    let links = service.list_owner_links(1, 1, 10).await.unwrap();

    let codes: Vec<&str> = links.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, ["ccc3333", "bbb2222", "aaa1111"]);
}

#[tokio::test]
async fn test_list_owner_links_pagination() {
    let repo = MemoryUrlRepository::shared();
    for i in 0..5 {
        seed_link(&repo, 1, &format!("code{i}00"), "https://example.com").await;
    }

    let service = LinkService::new(repo, Arc::new(RandomCodeGenerator::new()));

    let page1 = service.list_owner_links(1, 1, 2).await.unwrap();
    let page2 = service.list_owner_links(1, 2, 2).await.unwrap();
    let page3 = service.list_owner_links(1, 3, 2).await.unwrap();

    assert_eq!(page1.len(), 2);
    assert_eq!(page2.len(), 2);
    assert_eq!(page3.len(), 1);

    // Pages do not overlap.
    let mut seen = HashSet::new();
    for link in page1.iter().chain(&page2).chain(&page3) {
        assert!(seen.insert(link.code.clone()));
    }
}

use filmdex::db::Store;
use filmdex::models::FilmInput;

async fn memory_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

fn film(title: &str, year: i32, rank: Option<i32>) -> FilmInput {
    FilmInput {
        title: title.to_string(),
        year,
        rank,
        ..FilmInput::default()
    }
}

#[tokio::test]
async fn test_listing_returns_each_seeded_record_once() {
    let store = memory_store().await;

    store.add_film(&film("Film A", 2000, Some(1))).await.unwrap();
    store.add_film(&film("Film B", 2001, Some(2))).await.unwrap();

    let films = store.list_films().await.unwrap();
    assert_eq!(films.len(), 2);
    assert_eq!(store.count_films().await.unwrap(), 2);

    let titles: Vec<&str> = films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["Film A", "Film B"]);
}

#[tokio::test]
async fn test_listing_orders_by_rank_then_insertion() {
    let store = memory_store().await;

    store.add_film(&film("Third", 2000, Some(30))).await.unwrap();
    store.add_film(&film("First", 2000, Some(10))).await.unwrap();
    store.add_film(&film("Second", 2000, Some(20))).await.unwrap();

    let films = store.list_films().await.unwrap();
    let titles: Vec<&str> = films.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_toggle_flips_and_restores_seen() {
    let store = memory_store().await;

    let id = store.add_film(&film("Film A", 2000, None)).await.unwrap();

    let toggled = store.toggle_seen(id).await.unwrap().unwrap();
    assert!(toggled.seen);

    let toggled = store.toggle_seen(id).await.unwrap().unwrap();
    assert!(!toggled.seen);
}

#[tokio::test]
async fn test_toggle_missing_id_is_none_not_an_error() {
    let store = memory_store().await;

    let result = store.toggle_seen(404).await.unwrap();
    assert!(result.is_none());

    // The store stays usable afterwards
    store.ping().await.unwrap();
}

#[tokio::test]
async fn test_get_by_title_exact_match_only() {
    let store = memory_store().await;

    store
        .add_film(&film("The Godfather", 1972, Some(1)))
        .await
        .unwrap();

    let found = store.get_film_by_title("The Godfather").await.unwrap();
    assert_eq!(found.unwrap().year, 1972);

    assert!(store.get_film_by_title("Godfather").await.unwrap().is_none());
    assert!(
        store
            .get_film_by_title("the godfather")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_optional_metadata_round_trips() {
    let store = memory_store().await;

    let input = FilmInput {
        title: "Metropolis".to_string(),
        year: 1927,
        description: Some("Silent-era science fiction".to_string()),
        metascore: Some(98),
        rank: Some(12),
        seen: false,
    };
    store.add_film(&input).await.unwrap();

    let sparse = film("Sparse", 2005, None);
    store.add_film(&sparse).await.unwrap();

    let stored = store.get_film_by_title("Metropolis").await.unwrap().unwrap();
    assert_eq!(stored.metascore, Some(98));
    assert_eq!(stored.rank, Some(12));
    assert_eq!(
        stored.description.as_deref(),
        Some("Silent-era science fiction")
    );

    let stored = store.get_film_by_title("Sparse").await.unwrap().unwrap();
    assert!(stored.description.is_none());
    assert!(stored.metascore.is_none());
    assert!(stored.rank.is_none());
}

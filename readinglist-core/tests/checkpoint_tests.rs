use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use readinglist_core::{checkpoint, CheckpointError};

fn temp_checkpoint(tag: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "rl2instapaper_{}_{}",
        tag,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir.join("lastsyncdate")
}

#[tokio::test]
async fn checkpoint_round_trips_at_whole_second_precision() {
    let path = temp_checkpoint("roundtrip");
    let instant = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

    checkpoint::store(&path, instant).await.unwrap();
    let loaded = checkpoint::load(&path).await.unwrap();
    assert_eq!(loaded, Some(instant));

    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
}

#[tokio::test]
async fn store_truncates_subsecond_precision() {
    let path = temp_checkpoint("subsecond");
    let instant = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
        + chrono::Duration::milliseconds(250);

    checkpoint::store(&path, instant).await.unwrap();
    let loaded = checkpoint::load(&path).await.unwrap().unwrap();
    assert_eq!(loaded, Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());

    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
}

#[tokio::test]
async fn missing_checkpoint_is_not_an_error() {
    let path = temp_checkpoint("missing");
    assert_eq!(checkpoint::load(&path).await.unwrap(), None);
}

#[tokio::test]
async fn unparseable_checkpoint_is_fatal() {
    let path = temp_checkpoint("garbage");
    tokio::fs::create_dir_all(path.parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(&path, "not a timestamp").await.unwrap();

    let error = checkpoint::load(&path).await.unwrap_err();
    assert!(matches!(error, CheckpointError::Invalid(_)));

    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
}

#[tokio::test]
async fn date_only_checkpoint_is_accepted() {
    let path = temp_checkpoint("dateonly");
    tokio::fs::create_dir_all(path.parent().unwrap())
        .await
        .unwrap();
    tokio::fs::write(&path, "2023-11-20").await.unwrap();

    let loaded = checkpoint::load(&path).await.unwrap();
    assert_eq!(loaded, Some(Utc.with_ymd_and_hms(2023, 11, 20, 0, 0, 0).unwrap()));

    let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
}

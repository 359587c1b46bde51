use super::*;
use crate::data::player::PlayerRepository;
use crate::model::player::NewPlayer;

fn new_player(first_name: &str, last_name: &str) -> NewPlayer {
    NewPlayer {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2009, 3, 14).unwrap(),
        nationality: "Portugal".to_string(),
        ..Default::default()
    }
}

/// Expect a new player to be created active
#[tokio::test]
async fn create_is_active() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let repo = PlayerRepository::new(&test.db);

    let player = repo
        .create(academy.id, new_player("Rui", "Costa"))
        .await
        .unwrap();

    assert!(player.is_active);
    assert_eq!(player.academy_id, academy.id);

    Ok(())
}

/// Expect a player of another academy not to be found
#[tokio::test]
async fn find_in_academy_checks_ownership() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let other = test.academy().insert_mock_academy(2).await?;
    let player = test.academy().insert_mock_player(academy.id, 1).await?;
    let repo = PlayerRepository::new(&test.db);

    let own = repo.find_in_academy(academy.id, player.id).await.unwrap();
    let foreign = repo.find_in_academy(other.id, player.id).await.unwrap();

    assert_eq!(own.map(|p| p.id), Some(player.id));
    assert!(foreign.is_none());

    Ok(())
}

/// Expect deactivated players not to count
#[tokio::test]
async fn count_active_skips_inactive() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let first = test.academy().insert_mock_player(academy.id, 1).await?;
    test.academy().insert_mock_player(academy.id, 2).await?;
    let repo = PlayerRepository::new(&test.db);

    repo.set_active(first.id, false).await.unwrap();
    let count = repo.count_active(academy.id).await.unwrap();

    assert_eq!(count, 1);

    Ok(())
}

/// Expect players ordered by last then first name, paged from the cursor
#[tokio::test]
async fn list_orders_by_name_and_pages() -> Result<(), TestError> {
    let test = test_setup_with_academy_tables!()?;
    let academy = test.academy().insert_mock_academy(1).await?;
    let repo = PlayerRepository::new(&test.db);

    let silva_joao = repo.create(academy.id, new_player("Joao", "Silva")).await.unwrap();
    let almeida = repo.create(academy.id, new_player("Bruno", "Almeida")).await.unwrap();
    let silva_ana = repo.create(academy.id, new_player("Ana", "Silva")).await.unwrap();

    let all = repo
        .list_for_academy(academy.id, false, None, None)
        .await
        .unwrap();
    let page = repo
        .list_for_academy(academy.id, false, Some(silva_ana.id), Some(5))
        .await
        .unwrap();

    let all_ids: Vec<i32> = all.iter().map(|p| p.id).collect();
    let page_ids: Vec<i32> = page.iter().map(|p| p.id).collect();
    assert_eq!(all_ids, vec![almeida.id, silva_ana.id, silva_joao.id]);
    assert_eq!(page_ids, vec![silva_ana.id, silva_joao.id]);

    Ok(())
}

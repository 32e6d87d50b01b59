use blog_core::db::open_db_in_memory;
use blog_core::{
    Category, NewPost, Post, PostListQuery, PostRepository, PostService, RepoError,
    SqlitePostRepository,
};

fn long_content() -> String {
    "x".repeat(300)
}

fn fiction_post(title: &str) -> Post {
    Post::new(title, Category::Fiction)
        .unwrap()
        .with_content(long_content())
        .unwrap()
}

#[test]
fn publish_persists_post_with_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let created = service
        .publish_post(NewPost {
            title: "Guess What Happened".to_string(),
            content: Some("c".repeat(260)),
            summary: Some("s".repeat(100)),
            category: Some("Fiction".to_string()),
        })
        .unwrap();

    let id = created.id().unwrap();
    assert!(created.is_persisted());
    assert!(created.created_at().is_some());
    assert_eq!(created.updated_at(), None);

    let loaded = service.get_post(id).unwrap().unwrap();
    assert_eq!(loaded.title(), "Guess What Happened");
    assert_eq!(loaded.content().map(str::len), Some(260));
    assert_eq!(loaded.summary().map(str::len), Some(100));
    assert_eq!(loaded.category(), Category::Fiction);
}

#[test]
fn publish_rejects_invalid_request_without_persisting() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let err = service
        .publish_post(NewPost {
            title: "Ordinary News".to_string(),
            category: Some("Fiction".to_string()),
            ..NewPost::default()
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.field() == "title"));

    let err = service
        .publish_post(NewPost {
            title: "Top Picks".to_string(),
            category: Some("Drama".to_string()),
            ..NewPost::default()
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.field() == "category"));

    assert_eq!(service.count_posts().unwrap(), 0);
}

#[test]
fn update_rewrites_fields_and_sets_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let mut post = repo.create_post(&fiction_post("Top Stories")).unwrap();
    post.set_summary(Some("A short summary")).unwrap();
    post.set_category(Category::NonFiction);
    post.set_content(None).unwrap();
    repo.update_post(&post).unwrap();

    let loaded = repo.get_post(post.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.summary(), Some("A short summary"));
    assert_eq!(loaded.category(), Category::NonFiction);
    assert_eq!(loaded.content(), None);
    assert_eq!(loaded.created_at(), post.created_at());
    assert!(loaded.updated_at().is_some());
}

#[test]
fn update_and_delete_report_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    assert!(matches!(
        repo.update_post(&fiction_post("Secret Plans")).unwrap_err(),
        RepoError::NotPersisted("post")
    ));

    let created = repo.create_post(&fiction_post("Secret Plans")).unwrap();
    let id = created.id().unwrap();
    repo.delete_post(id).unwrap();

    assert!(repo.get_post(id).unwrap().is_none());
    assert!(matches!(
        repo.update_post(&created).unwrap_err(),
        RepoError::NotFound { entity: "post", .. }
    ));
    assert!(matches!(
        repo.delete_post(id).unwrap_err(),
        RepoError::NotFound { entity: "post", .. }
    ));
}

#[test]
fn list_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let fiction = repo.create_post(&fiction_post("Top Tales")).unwrap();
    let essay = repo
        .create_post(&Post::new("Secret History", Category::NonFiction).unwrap())
        .unwrap();

    let all = repo.list_posts(&PostListQuery::default()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), fiction.id());
    assert_eq!(all[1].id(), essay.id());

    let non_fiction = repo
        .list_posts(&PostListQuery {
            category: Some(Category::NonFiction),
        })
        .unwrap();
    assert_eq!(non_fiction.len(), 1);
    assert_eq!(non_fiction[0].title(), "Secret History");
}

#[test]
fn storage_rejects_unknown_category() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO posts (title, category) VALUES ('Top Picks', 'Drama');",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn read_path_rejects_invalid_persisted_row() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO posts (title, content, category) VALUES ('Top Picks', 'too short', 'Fiction');",
        [],
    )
    .unwrap();

    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    assert!(matches!(
        repo.list_posts(&PostListQuery::default()).unwrap_err(),
        RepoError::InvalidData(_)
    ));
}

#[test]
fn service_retitle_validates_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let created = service
        .publish_post(NewPost {
            title: "Top Picks".to_string(),
            category: Some("Non-Fiction".to_string()),
            ..NewPost::default()
        })
        .unwrap();
    let id = created.id().unwrap();

    let updated = service.retitle_post(id, "Guess the Winner").unwrap();
    assert_eq!(updated.title(), "Guess the Winner");
    assert!(updated.updated_at().is_some());

    assert!(service.retitle_post(id, "Plain Title").is_err());
    assert_eq!(
        service.get_post(id).unwrap().unwrap().title(),
        "Guess the Winner"
    );

    let mut edited = updated.clone();
    edited.set_summary(Some("tl;dr")).unwrap();
    let stored = service.update_post(&edited).unwrap();
    assert_eq!(stored.summary(), Some("tl;dr"));

    service.delete_post(id).unwrap();
    assert!(service
        .list_posts(&PostListQuery::default())
        .unwrap()
        .is_empty());
}

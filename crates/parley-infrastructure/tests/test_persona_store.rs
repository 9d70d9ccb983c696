use parley_core::catalog::{CatalogKind, CatalogRow};
use parley_core::persona::PersonaRepository;
use parley_infrastructure::DirPersonaRepository;
use tempfile::TempDir;

#[tokio::test]
async fn test_round_trip_for_varied_bodies() {
    let temp_dir = TempDir::new().unwrap();
    let repo = DirPersonaRepository::new(temp_dir.path().join("personas"));

    let cases = [
        ("plain", "Be terse."),
        ("multiline", "Line one\nLine two\n\nLine four"),
        ("unicode", "Réponds en français. 日本語も可。"),
        ("trailing-space", "  padded  \n"),
        ("empty", ""),
    ];

    for (name, body) in cases {
        repo.save(name, body).await.expect("save should succeed");
    }
    for (name, body) in cases {
        assert_eq!(repo.load(name).await.unwrap(), body, "round trip for {name}");
    }

    assert_eq!(
        repo.list().await,
        vec!["empty", "multiline", "plain", "trailing-space", "unicode"]
    );
}

#[tokio::test]
async fn test_imports_from_both_catalogs_never_collide() {
    let temp_dir = TempDir::new().unwrap();
    let repo = DirPersonaRepository::new(temp_dir.path());

    let row = CatalogRow::new("Hacker", "shared label");
    for kind in CatalogKind::ALL {
        let persona = row.to_persona(kind).unwrap();
        repo.save(&persona.name, &persona.body).await.unwrap();
    }

    assert_eq!(repo.list().await, vec!["Hacker_jailbreak", "Hacker_remote"]);
}

#[tokio::test]
async fn test_get_builds_full_persona() {
    let temp_dir = TempDir::new().unwrap();
    let repo = DirPersonaRepository::new(temp_dir.path());

    repo.save("pirate", "Arr.").await.unwrap();
    let persona = repo.get("pirate").await.unwrap();
    assert_eq!(persona.name, "pirate");
    assert_eq!(persona.body, "Arr.");

    assert!(repo.get("ghost").await.unwrap_err().is_not_found());
}

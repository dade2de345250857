//! Tests for the role catalog and result lookup

use agent_demo_core_rs::{CatalogError, Layer, ResultLookup, RoleCatalog};

#[test]
fn test_builtin_roles_in_selector_order() {
    let catalog = RoleCatalog::builtin();
    let ids: Vec<&str> = catalog.ids().collect();
    assert_eq!(ids, vec!["investor", "ceo", "consultant", "legal"]);
}

#[test]
fn test_builtin_roles_cover_every_layer() {
    for role in RoleCatalog::builtin().roles() {
        for layer in Layer::ALL {
            assert_eq!(
                role.agents_in(layer).count(),
                2,
                "role {} layer {}",
                role.id,
                layer
            );
        }
        assert!(!role.delivery.items.is_empty());
    }
}

#[test]
fn test_builtin_tasks_have_canned_results() {
    let results = ResultLookup::builtin();
    for role in RoleCatalog::builtin().roles() {
        for agent in &role.agents {
            for task in &agent.tasks {
                assert!(results.contains(task), "no outcomes for {}", task);
            }
        }
    }
}

#[test]
fn test_sample_query_wraps() {
    let catalog = RoleCatalog::builtin();
    let legal = catalog.get("legal").unwrap();
    assert_eq!(legal.sample_query(3), legal.sample_query(0));
}

#[test]
fn test_catalog_from_json() {
    let json = r#"[
        {
            "id": "chef",
            "name": "主厨",
            "agents": [
                {"id": "sous", "label": "副厨", "tasks": ["备料"], "layer": "core"}
            ],
            "sample_queries": ["今晚做什么菜"]
        }
    ]"#;
    let catalog = RoleCatalog::from_json(json).unwrap();
    assert!(catalog.validate().is_ok());

    let chef = catalog.get("chef").unwrap();
    assert_eq!(chef.agent("sous").map(|a| a.layer), Some(Layer::Core));
    assert!(chef.delivery.items.is_empty());
}

#[test]
fn test_duplicate_role_rejected() {
    let mut roles = RoleCatalog::builtin().roles().to_vec();
    roles.push(roles[0].clone());
    assert_eq!(
        RoleCatalog::new(roles).validate(),
        Err(CatalogError::DuplicateRole("investor".to_string()))
    );
}

#[test]
fn test_role_without_queries_rejected() {
    let mut roles = RoleCatalog::classic().roles().to_vec();
    roles[0].sample_queries.clear();
    assert_eq!(
        RoleCatalog::new(roles).validate(),
        Err(CatalogError::NoSampleQueries {
            role: "team".to_string()
        })
    );
}

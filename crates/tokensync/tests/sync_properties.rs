use serde_json::json;
use tokensync::store::{
    Collection, CollectionId, MemoryStore, ModeId, StoreError, Variable, VariableId, VariableKind,
    VariableStore, VariableValue,
};
use tokensync::{
    project, synchronize, AliasError, BrokenReason, SyncSettings, ThemeDescriptor, ThemeStatus,
    TokenSets,
};

fn sets(value: serde_json::Value) -> TokenSets {
    serde_json::from_value(value).unwrap()
}

fn themes(value: serde_json::Value) -> Vec<ThemeDescriptor> {
    serde_json::from_value(value).unwrap()
}

fn value_of(store: &MemoryStore, id: &VariableId, mode: &ModeId) -> VariableValue {
    store.variable(id).unwrap().values[mode].clone()
}

#[test]
fn test_end_to_end_color_alias() {
    let sets = sets(json!({
        "core": [
            { "name": "color.bg", "value": "#fff" },
            { "name": "color.fg", "value": "{color.bg}" }
        ]
    }));
    let themes = themes(json!([
        { "id": "t1", "name": "light", "selectedTokenSets": { "core": "enabled" } }
    ]));

    let mut store = MemoryStore::new();
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    assert_eq!(store.collections().len(), 1);
    assert_eq!(store.collections()[0].modes.len(), 1);
    assert_eq!(store.variables().len(), 2);

    let info = &outcome.variables["t1"];
    assert_eq!(
        value_of(&store, &info.variable_ids["color.bg"], &info.mode_id).to_string(),
        "#ffffff"
    );
    assert_eq!(
        value_of(&store, &info.variable_ids["color.fg"], &info.mode_id),
        VariableValue::Alias(info.variable_ids["color.bg"].clone())
    );
}

#[test]
fn test_second_run_changes_nothing() {
    let sets = sets(json!({
        "core": [
            { "name": "color.bg", "value": "#fff" },
            { "name": "color.fg", "value": "{color.bg}" },
            { "name": "spacing.sm", "value": 4 }
        ],
        "dark": [
            { "name": "color.bg", "value": "#000" }
        ]
    }));
    let themes = themes(json!([
        { "id": "t1", "name": "light", "group": "scheme",
          "selectedTokenSets": { "core": "enabled" } },
        { "id": "t2", "name": "dark", "group": "scheme",
          "selectedTokenSets": { "core": "enabled", "dark": "enabled" } }
    ]));

    let mut store = MemoryStore::new();
    let first = synchronize(&mut store, &themes, &sets, SyncSettings::default());
    let snapshot = store.clone();
    let second = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    assert_eq!(store, snapshot);
    assert_eq!(first.variables, second.variables);
    assert_eq!(store.collections().len(), 1);
    assert_eq!(store.variables().len(), 3);
}

#[test]
fn test_last_listed_set_wins() {
    let sets = sets(json!({
        "base": [{ "name": "color.brand", "value": "#111111" }],
        "override": [{ "name": "color.brand", "value": "#222222" }]
    }));
    let forward = ThemeDescriptor::new("a", "forward")
        .enable("base")
        .enable("override");
    let reverse = ThemeDescriptor::new("b", "reverse")
        .enable("override")
        .enable("base");

    let brand = |theme: &ThemeDescriptor| {
        project(theme, &sets)
            .effective
            .get("color.brand")
            .unwrap()
            .raw
            .to_string()
    };
    assert_eq!(brand(&forward), "#222222");
    assert_eq!(brand(&reverse), "#111111");
}

#[test]
fn test_spacing_alias_becomes_reference() {
    let sets = sets(json!({
        "core": [
            { "name": "spacing.lg", "value": 8 },
            { "name": "spacing.xl", "value": "{spacing.lg}" }
        ]
    }));
    let themes = [ThemeDescriptor::new("t1", "default").enable("core")];

    let mut store = MemoryStore::new();
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    let info = &outcome.variables["t1"];
    let xl = value_of(&store, &info.variable_ids["spacing.xl"], &info.mode_id);
    assert_eq!(
        xl,
        VariableValue::Alias(info.variable_ids["spacing.lg"].clone())
    );
    assert_ne!(xl, VariableValue::Float(8.0));
}

#[test]
fn test_alias_to_later_theme_is_linked() {
    let sets = sets(json!({
        "semantic": [{ "name": "color.danger", "value": "{color.red}" }],
        "palette": [{ "name": "color.red", "value": "#ff0000" }]
    }));
    let themes = [
        ThemeDescriptor::new("t1", "semantic")
            .source("palette")
            .enable("semantic"),
        ThemeDescriptor::new("t2", "palette").enable("palette"),
    ];

    let mut store = MemoryStore::new();
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    let semantic = &outcome.variables["t1"];
    let palette = &outcome.variables["t2"];
    assert_eq!(
        value_of(&store, &semantic.variable_ids["color.danger"], &semantic.mode_id),
        VariableValue::Alias(palette.variable_ids["color.red"].clone())
    );
    assert_eq!(outcome.report.links.linked, 1);
}

#[test]
fn test_source_only_target_in_shared_collection_stays_literal() {
    let sets = sets(json!({
        "palette": [{ "name": "color.red", "value": "#ff0000" }],
        "core": [{ "name": "color.danger", "value": "{color.red}" }]
    }));
    let themes = themes(json!([
        { "id": "t1", "name": "light", "group": "scheme",
          "selectedTokenSets": { "palette": "source", "core": "enabled" } },
        { "id": "t2", "name": "dark", "group": "scheme",
          "selectedTokenSets": { "palette": "enabled", "core": "enabled" } }
    ]));

    let mut store = MemoryStore::new();
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    let light = &outcome.variables["t1"];
    let dark = &outcome.variables["t2"];
    let danger = &dark.variable_ids["color.danger"];
    assert_eq!(
        value_of(&store, danger, &light.mode_id).to_string(),
        "#ff0000"
    );
    assert_eq!(
        value_of(&store, danger, &dark.mode_id),
        VariableValue::Alias(dark.variable_ids["color.red"].clone())
    );
    assert_eq!(outcome.report.links.linked, 1);
    assert_eq!(outcome.report.links.left_literal, ["color.red"]);
}

#[test]
fn test_broken_tokens_keep_raw_value() {
    let sets = sets(json!({
        "core": [
            { "name": "spacing.a", "value": "{spacing.b}" },
            { "name": "spacing.b", "value": "{spacing.a}" },
            { "name": "color.fg", "value": "{color.nope}" },
            { "name": "color.bg", "value": "#fafafa" }
        ]
    }));
    let themes = [ThemeDescriptor::new("t1", "light").enable("core")];

    let mut store = MemoryStore::new();
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    let report = outcome.report.theme("t1").unwrap();
    assert_eq!(report.status, ThemeStatus::Partial);

    let broken: Vec<_> = outcome.report.broken_tokens().collect();
    assert_eq!(broken.len(), 3);
    assert_eq!(broken[0].name, "spacing.a");
    assert_eq!(
        broken[0].reason,
        BrokenReason::Alias(AliasError::CircularReference {
            chain: vec!["spacing.a".into(), "spacing.b".into(), "spacing.a".into()]
        })
    );
    assert_eq!(broken[2].raw.to_string(), "{color.nope}");
    assert!(matches!(
        broken[2].reason,
        BrokenReason::Alias(AliasError::UnresolvedReference { .. })
    ));

    assert_eq!(store.variables().len(), 1);
}

#[test]
fn test_update_only_run_creates_nothing() {
    let sets = sets(json!({ "core": [{ "name": "spacing.sm", "value": 4 }] }));
    let themes = [ThemeDescriptor::new("t1", "light").enable("core")];

    let mut store = MemoryStore::new();
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::update_only());

    assert!(store.collections().is_empty());
    assert!(store.variables().is_empty());
    assert!(outcome.variables.is_empty());
    assert_eq!(outcome.report.skipped(), 1);
}

/// Rejects every write to one collection.
struct ReadOnlyCollection {
    inner: MemoryStore,
    locked: String,
}

impl ReadOnlyCollection {
    fn check(&self, collection: &CollectionId) -> Result<(), StoreError> {
        let locked = self
            .inner
            .collections()
            .into_iter()
            .any(|c| c.id == *collection && c.name == self.locked);
        if locked {
            return Err(StoreError::HostUnavailable("collection is locked".into()));
        }
        Ok(())
    }
}

impl VariableStore for ReadOnlyCollection {
    fn collections(&self) -> Vec<Collection> {
        self.inner.collections()
    }

    fn create_collection(&mut self, name: &str) -> Result<Collection, StoreError> {
        self.inner.create_collection(name)
    }

    fn create_mode(&mut self, collection: &CollectionId, name: &str) -> Result<ModeId, StoreError> {
        self.check(collection)?;
        self.inner.create_mode(collection, name)
    }

    fn rename_mode(
        &mut self,
        collection: &CollectionId,
        mode: &ModeId,
        name: &str,
    ) -> Result<(), StoreError> {
        self.inner.rename_mode(collection, mode, name)
    }

    fn variables(&self) -> Vec<Variable> {
        self.inner.variables()
    }

    fn create_variable(
        &mut self,
        collection: &CollectionId,
        name: &str,
        kind: VariableKind,
    ) -> Result<VariableId, StoreError> {
        self.check(collection)?;
        self.inner.create_variable(collection, name, kind)
    }

    fn set_value(
        &mut self,
        variable: &VariableId,
        mode: &ModeId,
        value: VariableValue,
    ) -> Result<(), StoreError> {
        self.inner.set_value(variable, mode, value)
    }
}

#[test]
fn test_store_failure_isolated_to_theme() {
    let sets = sets(json!({ "core": [{ "name": "spacing.sm", "value": 4 }] }));
    let themes = [
        ThemeDescriptor::new("t1", "locked").enable("core"),
        ThemeDescriptor::new("t2", "open").enable("core"),
    ];

    let mut store = ReadOnlyCollection {
        inner: MemoryStore::new(),
        locked: "locked".into(),
    };
    let outcome = synchronize(&mut store, &themes, &sets, SyncSettings::default());

    assert!(matches!(
        outcome.report.theme("t1").unwrap().status,
        ThemeStatus::Failed { .. }
    ));
    assert_eq!(outcome.report.theme("t2").unwrap().status, ThemeStatus::Synced);
    assert_eq!(outcome.variables.keys().collect::<Vec<_>>(), ["t2"]);
    assert_eq!(store.inner.variables().len(), 1);
}

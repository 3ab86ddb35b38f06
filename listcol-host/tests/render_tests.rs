mod common;

use common::{fixture, fixture_with, ids_of, titles};
use listcol_host::*;
use listcol_model::{
    CallbackRef, CallbackTable, ColumnDescriptor, InstanceSpec, ProviderError, RawColumnSpec,
    RawRowAction,
};
use listcol_store::{AttributeStore, MemoryAttributeStore};
use listcol_types::{ObjectId, ObjectKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;

fn shop() -> InstanceSpec {
    InstanceSpec::new("shop", "post")
        .column(RawColumnSpec::attribute("price", "Price", "price").sortable())
        .column(RawColumnSpec::attribute("sku", "SKU", "sku"))
}

// ── Titles ───────────────────────────────────────────────────────

#[test]
fn titles_are_injected_after_leading_columns() {
    let fx = fixture(vec![shop()]);
    let out = fx
        .pipeline
        .titles(&ObjectKind::Post, &titles(&["cb", "title", "author", "date"]));
    assert_eq!(ids_of(&out), vec!["cb", "title", "price", "sku", "author", "date"]);
    assert_eq!(out[2].1, "Price");
}

#[test]
fn titles_only_apply_to_own_kind() {
    let fx = fixture(vec![shop()]);
    let existing = titles(&["cb", "author", "comment"]);
    assert_eq!(fx.pipeline.titles(&ObjectKind::Comment, &existing), existing);
}

#[test]
fn titles_are_idempotent() {
    let fx = fixture(vec![shop()]);
    let once = fx.pipeline.titles(&ObjectKind::Post, &titles(&["cb", "title", "date"]));
    let twice = fx.pipeline.titles(&ObjectKind::Post, &once);
    assert_eq!(once, twice);
}

#[test]
fn existing_leading_key_keeps_its_title() {
    let fx = fixture(vec![shop()]);
    let existing = vec![
        ("price".to_string(), "Existing".to_string()),
        ("title".to_string(), "Title".to_string()),
    ];
    let out = fx.pipeline.titles(&ObjectKind::Post, &existing);
    assert_eq!(ids_of(&out), vec!["price", "title", "sku"]);
    assert_eq!(out[0].1, "Existing");
}

#[test]
fn short_listing_appends_columns() {
    let fx = fixture(vec![shop()]);
    let out = fx.pipeline.titles(&ObjectKind::Post, &titles(&["cb"]));
    assert_eq!(ids_of(&out), vec!["cb", "price", "sku"]);
}

#[test]
fn unset_and_rename_touch_only_their_target() {
    let mut registry = common::registry_from(vec![], &CallbackTable::new()).unwrap();
    registry.unset(ObjectKind::Post, "author").unwrap();
    registry.rename(ObjectKind::Post, "date", "Published").unwrap();
    registry.unset(ObjectKind::Post, "missing").unwrap();
    let fx = common::fixture_from_registry(Arc::new(registry), OutputFilters::new(), Arc::new(AllowAll));

    let out = fx
        .pipeline
        .titles(&ObjectKind::Post, &titles(&["cb", "title", "author", "date", "tags"]));
    assert_eq!(
        out,
        vec![
            ("cb".to_string(), "cb".to_string()),
            ("title".to_string(), "title".to_string()),
            ("date".to_string(), "Published".to_string()),
            ("tags".to_string(), "tags".to_string()),
        ]
    );
}

#[test]
fn sortable_ids_are_added_once() {
    let fx = fixture(vec![shop()]);
    let ids = fx
        .pipeline
        .sortable_ids(&ObjectKind::Post, &["title".to_string(), "price".to_string()]);
    assert_eq!(ids, vec!["title".to_string(), "price".to_string()]);

    let ids = fx.pipeline.sortable_ids(&ObjectKind::Post, &["title".to_string()]);
    assert_eq!(ids, vec!["title".to_string(), "price".to_string()]);
}

// ── Cells ────────────────────────────────────────────────────────

#[test]
fn attribute_cell_reads_store() {
    let fx = fixture(vec![shop()]);
    fx.store.set(&ObjectKind::Post, ObjectId::new(4), "price", "19.99").unwrap();

    assert_eq!(
        fx.pipeline.cell(&ObjectKind::Post, "price", ObjectId::new(4)),
        fx.store.get(&ObjectKind::Post, ObjectId::new(4), "price")
    );
}

#[test]
fn empty_cell_emits_nothing() {
    let fx = fixture(vec![shop()]);
    assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "price", ObjectId::new(4)), None);
    assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "unknown", ObjectId::new(4)), None);
}

#[test]
fn provider_cell_is_emitted_text_then_returned_value() {
    let mut callbacks = CallbackTable::new();
    callbacks.register_provider(
        "total",
        |id: ObjectId, column: &ColumnDescriptor, out: &mut String| {
            out.push_str(&format!("[{}]", column.id()));
            Ok(format!("#{id}"))
        },
    );
    let spec = InstanceSpec::new("shop", "post").column(RawColumnSpec::provider(
        "total",
        "Total",
        CallbackRef::named("total"),
    ));
    let fx = fixture_with(vec![spec], callbacks, OutputFilters::new(), Arc::new(AllowAll));

    assert_eq!(
        fx.pipeline.cell(&ObjectKind::Post, "total", ObjectId::new(9)).as_deref(),
        Some("[total]#9")
    );
}

#[test]
fn failing_provider_renders_nothing() {
    let mut callbacks = CallbackTable::new();
    callbacks.register_provider("broken", |_: ObjectId, _: &ColumnDescriptor, _: &mut String| {
        Err(ProviderError::new("backend down"))
    });
    callbacks.register_provider("panics", |_: ObjectId, _: &ColumnDescriptor, _: &mut String| {
        panic!("provider bug")
    });
    let spec = InstanceSpec::new("shop", "post")
        .column(RawColumnSpec::provider("a", "A", CallbackRef::named("broken")))
        .column(RawColumnSpec::provider("b", "B", CallbackRef::named("panics")));
    let fx = fixture_with(vec![spec], callbacks, OutputFilters::new(), Arc::new(AllowAll));

    assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "a", ObjectId::new(1)), None);
    assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "b", ObjectId::new(1)), None);
}

#[test]
fn filters_change_display_but_not_payload() {
    let spec = InstanceSpec::new("shop", "post")
        .column(RawColumnSpec::attribute("price", "Price", "price").inline_edit());
    let mut filters = OutputFilters::new();
    filters.add("price", |value: String| format!("${value}"));
    let fx = fixture_with(vec![spec], CallbackTable::new(), filters, Arc::new(AllowAll));
    fx.store.set(&ObjectKind::Post, ObjectId::new(2), "price", "5").unwrap();

    let cell = fx.pipeline.cell(&ObjectKind::Post, "price", ObjectId::new(2)).unwrap();
    assert_eq!(
        cell,
        r#"$5<script type="application/json" class="listcol-inline" data-row="2">{"row":2,"values":{"price":"5"}}</script>"#
    );
}

#[test]
fn inline_editable_cell_with_empty_value_still_carries_payload() {
    let spec = InstanceSpec::new("shop", "post")
        .column(RawColumnSpec::attribute("price", "Price", "price").inline_edit());
    let fx = fixture(vec![spec]);

    let cell = fx.pipeline.cell(&ObjectKind::Post, "price", ObjectId::new(2)).unwrap();
    assert!(cell.starts_with("<script"));
    assert!(cell.contains(r#""price":"""#));
}

#[test]
fn row_action_follows_value() {
    let spec = InstanceSpec::new("shop", "post").column(
        RawColumnSpec::attribute("price", "Price", "price")
            .inline_edit()
            .with_row_action(RawRowAction::new("edit.php", "Edit").param("post", "#object_id#")),
    );
    let fx = fixture(vec![spec]);
    fx.store.set(&ObjectKind::Post, ObjectId::new(3), "price", "7").unwrap();

    let cell = fx.pipeline.cell(&ObjectKind::Post, "price", ObjectId::new(3)).unwrap();
    let action = cell.find("<div class=\"row-actions\">").unwrap();
    let payload = cell.find("<script").unwrap();
    assert!(cell.starts_with('7'));
    assert!(action < payload);
    assert!(cell.contains("href=\"edit.php?post=3\""));
}

#[test]
fn comment_listing_reads_post_attribute_from_parent() {
    let spec = InstanceSpec::new("reviews", "comment").column(
        RawColumnSpec::attribute("product", "Product", "sku").with_object_kind("post"),
    );
    let fx = fixture(vec![spec]);
    fx.store.set(&ObjectKind::Post, ObjectId::new(30), "sku", "A-30").unwrap();
    fx.store
        .link_parent(ObjectKind::Comment, ObjectId::new(7), ObjectKind::Post, ObjectId::new(30));

    assert_eq!(
        fx.pipeline.cell(&ObjectKind::Comment, "product", ObjectId::new(7)).as_deref(),
        Some("A-30")
    );
    // Orphaned comment: no parent, nothing to show.
    assert_eq!(fx.pipeline.cell(&ObjectKind::Comment, "product", ObjectId::new(8)), None);
}

#[test]
fn resolver_reports_suppression() {
    let spec = InstanceSpec::new("shop", "post").column(
        RawColumnSpec::attribute("price", "Price", "price")
            .with_visibility(CallbackRef::predicate(|id: ObjectId| id.get() > 10)),
    );
    let fx = fixture(vec![spec]);
    let column = fx.registry.column(&ObjectKind::Post, "price").unwrap();
    let resolver = ValueResolver::new(
        fx.store.clone(),
        Arc::new(MemoryAttributeStore::new()),
        OutputFilters::new(),
    );
    assert_eq!(resolver.resolve(&ObjectKind::Post, column, ObjectId::new(1)), Resolved::Suppressed);
    assert_eq!(
        resolver.resolve(&ObjectKind::Post, column, ObjectId::new(11)),
        Resolved::Value {
            display: String::new(),
            raw: String::new()
        }
    );
}

#[test]
fn panicking_predicate_hides_only_its_own_cell() {
    let spec = InstanceSpec::new("shop", "post")
        .column(RawColumnSpec::attribute("price", "Price", "price"))
        .column(
            RawColumnSpec::attribute("stock", "Stock", "stock")
                .with_visibility(CallbackRef::predicate(|_: ObjectId| -> bool { panic!("broken predicate") })),
        );
    let fx = fixture(vec![spec]);
    let id = ObjectId::new(1);
    fx.store.set(&ObjectKind::Post, id, "price", "12").unwrap();
    fx.store.set(&ObjectKind::Post, id, "stock", "3").unwrap();

    assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "stock", id), None);
    assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "price", id).as_deref(), Some("12"));
}

// ── Edit forms ───────────────────────────────────────────────────

#[test]
fn quick_edit_fields_use_field_kind() {
    let spec = InstanceSpec::new("shop", "post").column(
        RawColumnSpec::attribute("price", "Price", "price")
            .inline_edit()
            .with_field_kind(listcol_model::FieldKind::Number),
    );
    let fx = fixture(vec![spec.column(RawColumnSpec::attribute("sku", "SKU", "sku"))]);

    assert_eq!(
        fx.pipeline.quick_edit_fields(&ObjectKind::Post, "price").unwrap(),
        "<fieldset class=\"inline-edit-col-left\"><div class=\"inline-edit-col column-price\"><label class=\"inline-edit-group\"><span class=\"title\">Price</span><span class=\"input-text-wrap\"><input type=\"number\" value=\"\" name=\"price\" class=\"ptitle\" /></span></label></div></fieldset>"
    );
    assert_eq!(fx.pipeline.quick_edit_fields(&ObjectKind::Post, "sku"), None);
    assert_eq!(
        fx.pipeline.bulk_edit_fields(&ObjectKind::Post, "price"),
        fx.pipeline.quick_edit_fields(&ObjectKind::Post, "price")
    );
}

#[test]
fn custom_input_type_reaches_edit_markup() {
    let fx = fixture(vec![InstanceSpec::new("hours", "post").column(
        RawColumnSpec::attribute("opens", "Opens at", "opens")
            .inline_edit()
            .with_field_kind(listcol_model::FieldKind::from("time".to_string())),
    )]);

    let fields = fx.pipeline.quick_edit_fields(&ObjectKind::Post, "opens").unwrap();
    assert!(fields.contains("<input type=\"time\" value=\"\" name=\"opens\""));
}

#[test]
fn comment_reply_fields_list_editable_comment_columns() {
    let spec = InstanceSpec::new("reviews", "comment")
        .column(RawColumnSpec::attribute("rating", "Rating", "rating").inline_edit())
        .column(RawColumnSpec::attribute("mood", "Mood", "mood"));
    let fx = fixture(vec![spec, shop()]);

    let fields = fx.pipeline.comment_reply_fields();
    assert!(fields.contains("name=\"rating\""));
    assert!(!fields.contains("name=\"mood\""));
    assert!(!fields.contains("name=\"price\""));
}

proptest! {
    #[test]
    fn hidden_column_never_renders(id in 0u64..100_000, value in "[a-z0-9]{1,8}") {
        let spec = InstanceSpec::new("shop", "post").column(
            RawColumnSpec::attribute("price", "Price", "price")
                .inline_edit()
                .with_visibility(CallbackRef::predicate(|_: ObjectId| false)),
        );
        let fx = fixture(vec![spec]);
        fx.store.set(&ObjectKind::Post, ObjectId::new(id), "price", &value).unwrap();
        prop_assert_eq!(fx.pipeline.cell(&ObjectKind::Post, "price", ObjectId::new(id)), None);
    }

    #[test]
    fn titles_idempotent_for_any_listing(
        existing in proptest::collection::vec("[a-z]{1,5}", 0..8),
    ) {
        let mut registry = common::registry_from(vec![shop()], &CallbackTable::new()).unwrap();
        registry.rename(ObjectKind::Post, "price", "Cost").unwrap();
        let fx = common::fixture_from_registry(Arc::new(registry), OutputFilters::new(), Arc::new(AllowAll));

        let existing: Vec<(String, String)> =
            existing.into_iter().map(|id| (id.clone(), id)).collect();
        let once = fx.pipeline.titles(&ObjectKind::Post, &existing);
        let twice = fx.pipeline.titles(&ObjectKind::Post, &once);
        prop_assert_eq!(once, twice);
    }
}

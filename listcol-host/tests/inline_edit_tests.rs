mod common;

use common::{fixture, fixture_with};
use listcol_client::{EditForm, InlineEditRuntime, ListingVariant, RowTrigger};
use listcol_host::*;
use listcol_model::{CallbackTable, InstanceSpec, RawColumnSpec};
use listcol_store::AttributeStore;
use listcol_types::{ObjectId, ObjectKind};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;

fn shop() -> InstanceSpec {
    InstanceSpec::new("shop", "post")
        .column(RawColumnSpec::attribute("price", "Price", "price").inline_edit())
        .column(RawColumnSpec::attribute("sku", "SKU", "sku").inline_edit())
        .column(RawColumnSpec::attribute("stock", "Stock", "stock"))
}

fn stored(fx: &common::Fixture, kind: ObjectKind, id: u64, key: &str) -> Option<String> {
    fx.store.get(&kind, ObjectId::new(id), key)
}

// ── Saving ───────────────────────────────────────────────────────

#[test]
fn submitted_values_are_written() {
    let fx = fixture(vec![shop()]);
    let request = SaveRequest::new(SavePath::Direct, ObjectKind::Post, vec![ObjectId::new(5)])
        .field("price", "12")
        .field("sku", "");

    let outcome = fx.sync.save(&request).unwrap();

    assert_eq!(outcome, SaveOutcome { written: 2, skipped: 0 });
    assert_eq!(stored(&fx, ObjectKind::Post, 5, "price").as_deref(), Some("12"));
    assert_eq!(stored(&fx, ObjectKind::Post, 5, "sku").as_deref(), Some(""));
}

#[test]
fn read_only_columns_are_not_written() {
    let fx = fixture(vec![shop()]);
    let request = SaveRequest::new(SavePath::Direct, ObjectKind::Post, vec![ObjectId::new(5)])
        .field("stock", "99");

    assert_eq!(fx.sync.save(&request).unwrap().written, 0);
    assert_eq!(stored(&fx, ObjectKind::Post, 5, "stock"), None);
}

#[test]
fn autosaves_and_revisions_are_ignored() {
    let fx = fixture(vec![shop()]);
    let mut request = SaveRequest::new(SavePath::Direct, ObjectKind::Post, vec![ObjectId::new(5)])
        .field("price", "12");
    request.autosave = true;
    assert_eq!(fx.sync.save(&request).unwrap(), SaveOutcome { written: 0, skipped: 1 });

    request.autosave = false;
    request.revision = true;
    assert_eq!(fx.sync.save(&request).unwrap().written, 0);
    assert_eq!(stored(&fx, ObjectKind::Post, 5, "price"), None);
}

#[test]
fn unauthorized_targets_are_skipped() {
    let authorizer: Arc<dyn Authorizer> = Arc::new(|_: &ObjectKind, id: ObjectId| id.get() != 2);
    let fx = fixture_with(vec![shop()], CallbackTable::new(), OutputFilters::new(), authorizer);
    let request = SaveRequest::new(
        SavePath::Bulk,
        ObjectKind::Post,
        vec![ObjectId::new(1), ObjectId::new(2), ObjectId::new(3)],
    )
    .field("price", "7");

    let outcome = fx.sync.save(&request).unwrap();

    assert_eq!(outcome, SaveOutcome { written: 2, skipped: 1 });
    assert_eq!(stored(&fx, ObjectKind::Post, 2, "price"), None);
    assert_eq!(stored(&fx, ObjectKind::Post, 3, "price").as_deref(), Some("7"));
}

#[test]
fn bulk_save_writes_every_target() {
    let fx = fixture(vec![shop()]);
    let targets: Vec<ObjectId> = (1..=3).map(ObjectId::new).collect();
    let request = SaveRequest::new(SavePath::Bulk, ObjectKind::Post, targets)
        .field("price", "4")
        .field("sku", "B");

    assert_eq!(fx.sync.save(&request).unwrap().written, 6);
    for id in 1..=3 {
        assert_eq!(stored(&fx, ObjectKind::Post, id, "sku").as_deref(), Some("B"));
    }
}

#[test]
fn save_path_must_match_listing_family() {
    let fx = fixture(vec![shop()]);
    let request = SaveRequest::new(SavePath::Reply, ObjectKind::Post, vec![ObjectId::new(5)])
        .field("price", "12");

    assert_eq!(fx.sync.save(&request).unwrap(), SaveOutcome { written: 0, skipped: 1 });
}

#[test]
fn term_edits_are_written_on_the_term() {
    let fx = fixture(vec![InstanceSpec::new("terms", "category")
        .column(RawColumnSpec::attribute("colour", "Colour", "colour").inline_edit())]);
    let request = SaveRequest::new(SavePath::Direct, ObjectKind::Category, vec![ObjectId::new(4)])
        .field("colour", "teal");

    fx.sync.save(&request).unwrap();
    assert_eq!(stored(&fx, ObjectKind::Category, 4, "colour").as_deref(), Some("teal"));
}

#[test]
fn comment_edits_of_post_attributes_go_to_the_parent() {
    let fx = fixture(vec![InstanceSpec::new("ratings", "comment").column(
        RawColumnSpec::attribute("price", "Post price", "price")
            .with_object_kind("post")
            .inline_edit(),
    )]);
    fx.store
        .link_parent(ObjectKind::Comment, ObjectId::new(7), ObjectKind::Post, ObjectId::new(30));

    let request = SaveRequest::new(
        SavePath::Reply,
        ObjectKind::Comment,
        vec![ObjectId::new(7), ObjectId::new(8)],
    )
    .field("price", "9");
    let outcome = fx.sync.save(&request).unwrap();

    assert_eq!(outcome, SaveOutcome { written: 1, skipped: 1 });
    assert_eq!(stored(&fx, ObjectKind::Post, 30, "price").as_deref(), Some("9"));
    assert_eq!(stored(&fx, ObjectKind::Comment, 7, "price"), None);
}

// ── Round trip ───────────────────────────────────────────────────

#[test]
fn rendered_value_reaches_the_edit_form_and_comes_back() {
    let fx = fixture(vec![shop()]);
    let id = ObjectId::new(5);
    fx.store.set(&ObjectKind::Post, id, "price", "12.50").unwrap();
    fx.store.set(&ObjectKind::Post, id, "sku", "A-1").unwrap();

    let mut row = String::new();
    for column in ["price", "sku", "stock"] {
        if let Some(cell) = fx.pipeline.cell(&ObjectKind::Post, column, id) {
            row.push_str(&format!("<td>{cell}</td>"));
        }
    }
    let rows = HashMap::from([("post-5".to_string(), row)]);

    let mut fields = fx.pipeline.quick_edit_fields(&ObjectKind::Post, "price").unwrap();
    fields.push_str(&fx.pipeline.quick_edit_fields(&ObjectKind::Post, "sku").unwrap());
    let mut form = EditForm::from_markup("edit-5", &fields).unwrap();

    let runtime =
        InlineEditRuntime::new(ListingVariant::PostLike, fx.pipeline.payload_class(), rows).unwrap();
    assert_eq!(runtime.open(&RowTrigger::Id(5), &mut form).unwrap(), 2);
    assert_eq!(form.value("price"), Some("12.50"));
    assert_eq!(form.value("sku"), Some("A-1"));

    form.set("price", "15");
    let mut request = SaveRequest::new(SavePath::Direct, ObjectKind::Post, vec![id]);
    request.form = form.into_submission();
    assert_eq!(fx.sync.save(&request).unwrap().written, 2);

    assert_eq!(stored(&fx, ObjectKind::Post, 5, "price").as_deref(), Some("15"));
    assert_eq!(stored(&fx, ObjectKind::Post, 5, "sku").as_deref(), Some("A-1"));
}

// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compiling definition text and reading the database back.

mod common;

use common::{centers_in_line, CALLS_SOURCE};
use pretty_assertions::assert_eq;
use sd_engine::compiler::{CompileErrorKind, CompileWarning};
use sd_engine::database::{ArrayBody, Definition, SchemaKind};
use sd_engine::predicates::{CallOptions, EvalContext, Predicate};
use sd_engine::{compile, CallCatalog, CallDatabase, Level, Selector};

#[test]
fn test_fixture_round_trips() {
    let out = compile(CALLS_SOURCE).unwrap();
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    assert_eq!(out.database.calls.len(), 7);
    assert_eq!(out.database.call_count(), 8);

    let loaded = CallDatabase::from_bytes(&out.bytes).unwrap();
    for (written, read) in out.database.calls.iter().zip(&loaded.calls) {
        assert_eq!(written, read);
    }
    assert_eq!(loaded, out.database);
    assert_eq!(loaded.to_bytes().unwrap(), out.bytes);
}

#[test]
fn test_fixture_records() {
    let out = compile(CALLS_SOURCE).unwrap();
    let db = &out.database;
    assert_eq!(db.version, "integration fixture");
    assert_eq!(usize::from(db.tag_count), out.tags.len());

    let swing = db.call("swing thru").unwrap();
    assert_eq!(swing.level, Level::Mainstream);
    assert_eq!(swing.tag, None);
    let Definition::Concentric(inner, outer) = &swing.body.definition else {
        panic!("expected a concentric definition");
    };
    assert_eq!(Some(inner.tag), out.tags.id("trade"));
    assert_eq!(Some(outer.tag), out.tags.id("hinge"));

    let double = db.call("double sweep").unwrap();
    assert_eq!(double.body.schema.kind(), SchemaKind::Sequential);
    assert_eq!(double.header_count(), 2);

    let pick = db.call("pick one").unwrap();
    assert_eq!(pick.level, Level::A2);
}

#[test]
fn test_compiled_clauses_choose_by_selector() {
    let out = compile(CALLS_SOURCE).unwrap();
    let pick = out.database.call("pick one").unwrap();
    let Definition::Array(groups) = &pick.body.definition else {
        panic!("expected an array definition");
    };
    let ArrayBody::Preds { clauses, .. } = &groups[0].defs[0].body else {
        panic!("expected predicate clauses");
    };
    assert_eq!(clauses[0].predicate, Predicate::Select);
    assert!(clauses[0].predicate.needs_selector());

    let f = centers_in_line();
    let mut ctx = EvalContext::new(CallOptions::with_selector(Selector::Centers));
    let chosen: Vec<usize> = (0..4)
        .filter(|&slot| clauses[0].predicate.evaluate(&mut ctx, &f, slot) == Ok(true))
        .collect();
    assert_eq!(chosen, vec![1, 3]);
    assert!(ctx.selector_used);
    assert_eq!(clauses[1].predicate.evaluate(&mut ctx, &f, 0), Ok(true));
}

#[test]
fn test_catalog_from_compiled_database() {
    let out = compile(CALLS_SOURCE).unwrap();
    let catalog = CallCatalog::from_database(&out.database);
    assert_eq!(catalog.calls().len(), 7);
    assert!(catalog.circcers().is_empty());
    assert_eq!(catalog.calls()[0].name, "hinge");
}

#[test]
fn test_tag_closure() {
    let missing = r#"version "closure"
call "sweep and trade" plus
   seq sweep [] seq trade []
"#;
    let err = compile(missing).unwrap_err();
    // "trade" is a base tag but still needs a definition.
    assert_eq!(
        err.kind,
        CompileErrorKind::UndefinedTags(vec!["trade".to_string(), "sweep".to_string()])
    );
    assert!(err.to_string().contains("sweep"));
    assert_eq!(err.line, 3);
    assert_eq!(err.last_call.as_deref(), Some("sweep and trade"));

    let complete = format!(
        "{missing}{}",
        r#"call "sweep a quarter" plus tag sweep
   nulldefine
call "partner trade" mainstream tag trade
   setup 1x2 1x2
      array [1S 0S]
"#
    );
    let out = compile(&complete).unwrap();
    assert!(out.warnings.is_empty());
    assert_eq!(out.database.calls.len(), 3);
}

#[test]
fn test_duplicate_tag_rejected() {
    let source = r#"version "dup"
call "foo" mainstream tag foo
   nulldefine
call "foo again" mainstream tag foo
   nulldefine
"#;
    let err = compile(source).unwrap_err();
    assert_eq!(err.kind, CompileErrorKind::DuplicateTag("foo".to_string()));
    assert_eq!(err.kind.to_string(), "Multiple definition of a call tag");
    assert_eq!(err.line, 4);
    assert_eq!(err.last_call.as_deref(), Some("foo again"));
}

#[test]
fn test_unreferenced_tag_warns() {
    let source = r#"version "lonely"
call "lonely" c1 tag lonely
   nulldefine
"#;
    let out = compile(source).unwrap();
    assert_eq!(
        out.warnings,
        vec![CompileWarning::UnreferencedTag("lonely".to_string())]
    );
}

#[test]
fn test_callarray_length_is_checked() {
    let source = r#"version "short"
call "short" mainstream
   setup 2x2 2x2
      array [0 0 0 0 0]
"#;
    let err = compile(source).unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::CallArrayLength {
            found: 5,
            expected: 4
        }
    );
    assert_eq!(err.last_call.as_deref(), Some("short"));
}

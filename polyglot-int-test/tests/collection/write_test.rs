use polyglot::collection::{insert_if_absent, WriteOptions};
use polyglot::common::Value;
use polyglot::doc;
use polyglot::errors::ErrorKind;
use polyglot_int_test::test_util::{
    cleanup, create_test_context, insert_legacy_pages, insert_localized_pages, run_test,
};

#[test]
fn test_create_strips_read_only() {
    run_test(
        create_test_context,
        |ctx| {
            let stored = ctx.pages().create(
                doc! { text: "contact", title: "Contact", readOnly: true },
                &WriteOptions::default(),
            )?;

            assert!(stored.has_id());
            assert!(!stored.contains_key("readOnly"));
            assert!(!stored.contains_key("i18n"));
            assert_eq!(stored.get("title")?, Value::from("Contact"));
            assert_eq!(stored.get("version")?, Value::I64(1));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_persists_metadata_only() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let fr = ctx.pages_in("fr");

            let mut page = fr.find_by_id("news", false)?.unwrap();
            page.put("title", "Changé")?;
            page.put("orderValue", 7)?;
            page.put("readOnly", true)?;

            let updated = fr.update(page, &WriteOptions::default())?;
            assert_eq!(updated.get("orderValue")?, Value::I32(7));
            assert!(!updated.contains_key("title"));
            assert!(!updated.contains_key("readOnly"));

            let page = fr.find_by_id("news", false)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Bonjour"));
            assert_eq!(page.get("orderValue")?, Value::I32(7));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_localized_writes_into_working_locale() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let fr = ctx.pages_in("fr");

            let mut page = fr.find_by_id("news", false)?.unwrap();
            page.put("title", "Nouvelles")?;
            page.put("tags", vec!["x", "y"])?;
            page.put("online", false)?;

            let updated = fr.update_localized(page, &WriteOptions::default())?;
            assert_eq!(updated.get("title")?, Value::from("Nouvelles"));
            assert_eq!(updated.get("tags")?, Value::from(vec!["x", "y"]));
            assert_eq!(updated.get("online")?, Value::Bool(false));
            assert_eq!(updated.get("version")?, Value::I64(2));

            let en = ctx.pages().find_by_id("news", false)?.unwrap();
            assert_eq!(en.get("title")?, Value::from("Hello"));
            assert_eq!(en.get("online")?, Value::Bool(false));

            let raw = ctx.pages().find_raw_by_id("news", false)?.unwrap();
            assert_eq!(raw.get("nativeLanguage")?, Value::from("en"));
            assert_eq!(raw.get("i18n.fr.locale")?, Value::from("fr"));
            assert_eq!(raw.get("i18n.de.title")?, Value::from("Hallo"));
            assert!(!raw.contains_key("title"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_localized_adds_a_locale() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let it = ctx.pages_in("it");

            // unknown locale reads fall back to the native content
            let page = it.find_by_id("blog", false)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Hello"));

            it.update_localized(doc! { id: "blog", title: "Ciao" }, &WriteOptions::default())?;

            let page = it.find_by_id("blog", false)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Ciao"));
            assert_eq!(page.get("locale")?, Value::from("it"));
            // fields the new locale does not carry come from the record itself
            assert_eq!(page.get("tags")?, Value::Null);

            let en = ctx.pages().find_by_id("blog", false)?.unwrap();
            assert_eq!(en.get("title")?, Value::from("Hello"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_localized_seeds_legacy_record() {
    run_test(
        create_test_context,
        |ctx| {
            insert_legacy_pages(&ctx.collection())?;
            let pages = ctx.pages();

            let updated = pages.update_localized(
                doc! { id: "home", title: "Welcome back", readOnly: true },
                &WriteOptions::default(),
            )?;
            assert_eq!(updated.get("title")?, Value::from("Welcome back"));
            assert_eq!(updated.get("body.intro")?, Value::from("Hello there"));

            let raw = pages.find_raw_by_id("home", false)?.unwrap();
            assert_eq!(raw.get("nativeLanguage")?, Value::from("en"));
            assert_eq!(raw.get("i18n.en.title")?, Value::from("Welcome back"));
            assert_eq!(raw.get("i18n.en.tags")?, Value::from(vec!["start", "main"]));
            assert_eq!(raw.get("i18n.en.blockId")?, Value::Null);
            assert_eq!(raw.get("blockId")?, Value::from("b-home"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_update_localized_requires_existing_record() {
    run_test(
        create_test_context,
        |ctx| {
            let pages = ctx.pages();

            let err = pages
                .update_localized(doc! { title: "No id" }, &WriteOptions::default())
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidId);

            let err = pages
                .update_localized(doc! { id: "ghost", title: "Boo" }, &insert_if_absent())
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotFound);
            assert_eq!(pages.count(None)?, 0);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_plain_update_of_missing_record() {
    run_test(
        create_test_context,
        |ctx| {
            let pages = ctx.pages();
            let err = pages
                .update(doc! { id: "ghost", online: true }, &WriteOptions::default())
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotFound);

            let created = pages.update(doc! { id: "ghost", online: true, title: "t" }, &insert_if_absent())?;
            assert_eq!(created.get("online")?, Value::Bool(true));
            assert!(!created.contains_key("title"));
            Ok(())
        },
        cleanup,
    )
}

use polyglot::collection::WriteOptions;
use polyglot::common::{sort_by, SortOrder, Value};
use polyglot::doc;
use polyglot::errors::ErrorKind;
use polyglot::filter::{all, field};
use polyglot::i18n::LocaleContext;
use polyglot_int_test::test_util::{
    cleanup, create_filtered_test_context, create_test_context, insert_legacy_pages,
    insert_localized_pages, run_test,
};

#[test]
fn test_find_by_id_resolves_working_locale() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;

            let page = ctx.pages().find_by_id("news", false)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Hello"));
            assert_eq!(page.get("body.outro")?, Value::from("Bye"));

            let page = ctx.pages_in("fr").find_by_id("news", false)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Bonjour"));
            assert_eq!(page.get("tags")?, Value::from(vec!["c"]));
            assert_eq!(page.get("body.intro")?, Value::from("Bienvenue"));
            assert_eq!(page.get("online")?, Value::Bool(true));

            let page = ctx.pages_in("de").find_by_id("news", true)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Hallo"));
            assert_eq!(page.get("locale")?, Value::from("de"));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_missing_locale_falls_back_to_native_language() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;

            let page = ctx.pages_in("es").find_by_id("news", false)?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Hello"));
            assert_eq!(page.get("locale")?, Value::from("en"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_get_list_resolves_every_record() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let fr = ctx.pages_in("fr");

            let sort = sort_by("orderValue", SortOrder::Descending)
                .add_sorted_field("text", SortOrder::Ascending);
            let list = fr.get_list(Some(&all()), Some(&sort), None, None)?;
            assert_eq!(list.total(), 3);

            let ids: Vec<String> = list.data().iter().filter_map(|d| d.id()).collect();
            assert_eq!(ids, vec!["blog", "news", "post"]);
            assert!(list
                .data()
                .iter()
                .all(|d| d.get("title").unwrap() == Value::from("Bonjour")));

            let page = fr.get_list(None, Some(&sort), Some(1), Some(1))?;
            assert_eq!(page.total(), 3);
            assert_eq!(page.data().len(), 1);
            assert_eq!(page.data()[0].id(), Some("news".to_string()));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_find_by_name_and_find_one() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let de = ctx.pages_in("de");

            let page = de.find_by_name("blog")?.unwrap();
            assert_eq!(page.get("title")?, Value::from("Hallo"));
            assert!(de.find_by_name("missing")?.is_none());

            let page = de.find_one(&field("parentId").eq("blog"))?.unwrap();
            assert_eq!(page.id(), Some("post".to_string()));
            assert_eq!(page.get("title")?, Value::from("Hallo"));

            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filters_match_stored_content() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let fr = ctx.pages_in("fr");

            // resolved fields are not visible to filters
            assert!(fr.find_one(&field("title").eq("Bonjour"))?.is_none());
            let found = fr.find_one(&field("i18n.fr.title").eq("Bonjour"))?;
            assert!(found.is_some());

            assert_eq!(fr.count(Some(&field("parentId").eq("root")))?, 2);
            assert_eq!(fr.count(None)?, 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_include_i18n_switch() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let stored = ctx.pages().find_raw_by_id("news", false)?.unwrap();

            let editing = ctx.pages_in("fr");
            let page = editing.find_by_id("news", false)?.unwrap();
            assert_eq!(page.get("i18n")?, stored.get("i18n")?);

            let public = ctx.pages().with_context(
                LocaleContext::default()
                    .with_working_locale("fr")
                    .with_include_i18n(false),
            );
            for page in public.get_list(None, None, None, None)?.into_data() {
                assert!(!page.contains_key("i18n"));
                assert_eq!(page.get("nativeLanguage")?, Value::from("en"));
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_legacy_records_pass_through() {
    run_test(
        create_test_context,
        |ctx| {
            insert_legacy_pages(&ctx.collection())?;

            let raw = ctx.collection().find_by_id("home", false)?.unwrap();
            let page = ctx.pages_in("fr").find_by_id("home", false)?.unwrap();
            assert_eq!(page, raw);
            assert_eq!(page.get("title")?, Value::from("Welcome"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_user_filter_applies_to_reads() {
    run_test(
        create_filtered_test_context,
        |ctx| {
            insert_legacy_pages(&ctx.collection())?;
            let pages = ctx.pages();

            assert!(pages.find_by_id("team", false)?.is_none());
            assert_eq!(pages.get_list(None, None, None, None)?.total(), 2);
            assert_eq!(pages.count(None)?, 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_corrupt_record_fails_reads() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            ctx.collection().create(
                doc! { id: "broken", parentId: "root", i18n: { fr: { title: "Bonjour" } } },
                &WriteOptions::default(),
            )?;

            let de = ctx.pages_in("de");
            let err = de.find_by_id("broken", false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::IntegrityFault);
            assert_eq!(err.message(), "No defined native language for this item");

            let err = de.read_child("root", None, None).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::IntegrityFault);

            // healthy records still resolve one by one
            assert!(de.find_by_id("news", false)?.is_some());
            Ok(())
        },
        cleanup,
    )
}

use polyglot::collection::WriteOptions;
use polyglot::common::Value;
use polyglot::doc;
use polyglot::i18n::LocaleContext;
use polyglot_int_test::test_util::{
    cleanup, create_filtered_test_context, create_test_context, insert_legacy_pages,
    insert_localized_pages, run_test,
};

#[test]
fn test_migration_localizes_every_record() {
    run_test(
        create_filtered_test_context,
        |ctx| {
            insert_legacy_pages(&ctx.collection())?;
            let pages = ctx.pages();

            let report = pages.add_localization_for_collection()?;
            assert!(report.is_success());
            assert_eq!(report.total(), 3);
            assert_eq!(report.migrated(), &["home", "about", "team"].map(String::from));

            // the private page was migrated even though this user cannot read it
            assert!(pages.find_raw_by_id("team", false)?.is_none());
            ctx.collection().disable_user_filter(true);
            let team = pages.find_raw_by_id("team", false)?.unwrap();
            ctx.collection().disable_user_filter(false);
            assert_eq!(team.get("i18n.en.title")?, Value::from("The team"));
            assert_eq!(team.get("nativeLanguage")?, Value::from("en"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_migrated_records_read_as_before() {
    run_test(
        create_test_context,
        |ctx| {
            insert_legacy_pages(&ctx.collection())?;
            let public = ctx.pages().with_context(LocaleContext::default().with_include_i18n(false));
            let before = public.find_by_id("home", false)?.unwrap();

            ctx.pages().add_localization_for_collection()?;

            let after = public.find_by_id("home", false)?.unwrap();
            assert_eq!(after.get("title")?, before.get("title")?);
            assert_eq!(after.get("tags")?, before.get("tags")?);
            assert_eq!(after.get("body")?, before.get("body")?);
            assert_eq!(after.get("blockId")?, Value::from("b-home"));
            assert_eq!(after.get("locale")?, Value::from("en"));
            assert!(!after.contains_key("i18n"));

            // any locale falls back to the seeded native content
            let fr = ctx.pages_in("fr").find_by_id("home", false)?.unwrap();
            assert_eq!(fr.get("title")?, Value::from("Welcome"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_migration_skips_localized_records() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            insert_legacy_pages(&ctx.collection())?;

            let first = ctx.pages().add_localization_for_collection()?;
            assert_eq!(first.migrated().len(), 3);
            assert_eq!(first.skipped(), &["news", "blog", "post"].map(String::from));

            let second = ctx.pages().add_localization_for_collection()?;
            assert!(second.migrated().is_empty());
            assert_eq!(second.skipped().len(), 6);

            let news = ctx.pages().find_raw_by_id("news", false)?.unwrap();
            assert_eq!(news.get("version")?, Value::I64(1));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_migration_handles_integer_ids() {
    run_test(
        create_filtered_test_context,
        |ctx| {
            for (id, workspace) in [(1, "global"), (2, "private")] {
                ctx.collection().create(
                    doc! { id: id, workspace: workspace, title: "Hello", parentId: "root" },
                    &WriteOptions::default(),
                )?;
            }

            let report = ctx.pages().add_localization_for_collection()?;
            assert!(report.is_success());
            assert_eq!(report.migrated(), &["1", "2"].map(String::from));

            let raw = ctx.pages().find_raw_by_id("1", false)?.unwrap();
            assert_eq!(raw.get("id")?, Value::I32(1));
            assert_eq!(raw.get("nativeLanguage")?, Value::from("en"));
            assert_eq!(raw.get("i18n.en.title")?, Value::from("Hello"));

            let fr = ctx.pages_in("fr").find_by_id("1", false)?.unwrap();
            assert_eq!(fr.get("title")?, Value::from("Hello"));

            let second = ctx.pages().add_localization_for_collection()?;
            assert_eq!(second.skipped(), &["1", "2"].map(String::from));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_migration_seeds_under_default_locale() {
    run_test(
        create_test_context,
        |ctx| {
            ctx.collection().create(
                doc! { id: "page", title: "Bonjour", parentId: "root" },
                &WriteOptions::default(),
            )?;

            let french_site = ctx
                .pages()
                .with_context(LocaleContext::default().with_default_locale("fr"));
            let report = french_site.add_localization_for_collection()?;
            assert_eq!(report.migrated().len(), 1);

            let raw = french_site.find_raw_by_id("page", false)?.unwrap();
            assert_eq!(raw.get("nativeLanguage")?, Value::from("fr"));
            assert_eq!(raw.get("i18n.fr.title")?, Value::from("Bonjour"));
            assert_eq!(raw.get("i18n.fr.locale")?, Value::from("fr"));
            assert_eq!(raw.get("i18n.en")?, Value::Null);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_add_localization_is_idempotent() {
    run_test(
        create_test_context,
        |ctx| {
            let pages = ctx.pages();
            let doc = doc! { id: "x", title: "Hi", blockId: "b", body: { intro: "Hey" } };

            let once = pages.add_localization(&doc);
            let twice = pages.add_localization(&once);
            assert_eq!(once, twice);
            assert_eq!(
                once,
                doc! {
                    id: "x",
                    blockId: "b",
                    nativeLanguage: "en",
                    i18n: { en: { title: "Hi", body: { intro: "Hey" }, locale: "en" } },
                }
            );
            Ok(())
        },
        cleanup,
    )
}

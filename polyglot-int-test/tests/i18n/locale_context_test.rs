use polyglot::common::Value;
use polyglot::errors::ErrorKind;
use polyglot::i18n::LocaleContext;
use polyglot_int_test::test_util::{cleanup, create_test_context, insert_localized_pages, run_test};
use std::thread;

#[test]
fn test_views_do_not_share_locale_state() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let mut pages = ctx.pages();
            let fr = ctx.pages_in("fr");

            pages.set_working_locale(Some("de"))?;
            assert_eq!(fr.working_locale(), Some("fr"));
            assert_eq!(ctx.pages().working_locale(), None);

            let de_page = pages.find_by_id("news", false)?.unwrap();
            let fr_page = fr.find_by_id("news", false)?.unwrap();
            assert_eq!(de_page.get("title")?, Value::from("Hallo"));
            assert_eq!(fr_page.get("title")?, Value::from("Bonjour"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_concurrent_requests_in_different_locales() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let expected = [("en", "Hello"), ("fr", "Bonjour"), ("de", "Hallo"), ("es", "Hello")];

            thread::scope(|scope| {
                for (locale, title) in expected {
                    let view = ctx.pages_in(locale);
                    scope.spawn(move || {
                        for _ in 0..50 {
                            let list = view.get_list(None, None, None, None).unwrap();
                            for page in list.data() {
                                assert_eq!(page.get("title").unwrap(), Value::from(title));
                            }
                        }
                    });
                }
            });
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_locale_switches_are_validated() {
    run_test(
        create_test_context,
        |ctx| {
            let mut pages = ctx.pages();

            let err = pages.set_working_locale(Some("")).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError);
            let err = pages.set_default_locale("   ").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError);

            assert_eq!(pages.default_locale(), "en");
            assert_eq!(pages.working_locale(), None);
            assert!(pages.include_i18n());

            pages.set_include_i18n(false);
            pages.set_default_locale("fr")?;
            assert_eq!(
                pages.context(),
                &LocaleContext::default()
                    .with_default_locale("fr")
                    .with_include_i18n(false)
            );
            Ok(())
        },
        cleanup,
    )
}

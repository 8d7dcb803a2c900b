use polyglot::collection::{
    Collection, Document, InMemoryCollection, LocalizableCollection, WriteOptions,
};
use polyglot::doc;
use polyglot::errors::{ErrorKind, PolyglotError, PolyglotResult};
use polyglot::filter::field;
use polyglot::i18n::LocaleContext;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Runs a test between its setup and teardown steps.
///
/// `after` runs even when the test fails or panics, so teardown checks are
/// always applied. The first failure is reported with its phase.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> PolyglotResult<()>,
    B: Fn() -> PolyglotResult<TestContext>,
    A: Fn(TestContext) -> PolyglotResult<()>,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_ctx = ctx.clone();
    let result = panic::catch_unwind(AssertUnwindSafe(move || test(test_ctx)));
    let after_result = after(ctx);
    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed after {:?}: {:?}", elapsed, e),
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            panic!("Test panicked after {:?}: {}", elapsed, err_msg);
        }
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    collection: Collection,
    pages: LocalizableCollection,
}

impl TestContext {
    pub fn new(collection: Collection, pages: LocalizableCollection) -> Self {
        Self { collection, pages }
    }

    /// The base collection, unlocalized.
    pub fn collection(&self) -> Collection {
        self.collection.clone()
    }

    /// The localizable facade over [TestContext::collection].
    pub fn pages(&self) -> LocalizableCollection {
        self.pages.clone()
    }

    /// A view of the facade with the given working locale.
    pub fn pages_in(&self, locale: &str) -> LocalizableCollection {
        self.pages
            .with_context(self.pages.context().clone().with_working_locale(locale))
    }
}

pub fn random_name() -> String {
    format!("pages-{}", uuid::Uuid::new_v4())
}

/// A fresh in-memory collection without user filtering.
pub fn create_test_context() -> PolyglotResult<TestContext> {
    let collection = Collection::new(InMemoryCollection::new(&random_name()));
    Ok(context_for(collection))
}

/// A fresh in-memory collection whose reads only see the `global` workspace.
pub fn create_filtered_test_context() -> PolyglotResult<TestContext> {
    let collection = Collection::new(InMemoryCollection::with_user_filter(
        &random_name(),
        field("workspace").eq("global"),
    ));
    Ok(context_for(collection))
}

fn context_for(collection: Collection) -> TestContext {
    let pages = LocalizableCollection::builder(collection.clone())
        .non_localizable_fields(["blockId", "maskId"])
        .context(LocaleContext::default())
        .build();
    TestContext::new(collection, pages)
}

/// Fails when a test left user filtering switched off.
pub fn cleanup(ctx: TestContext) -> PolyglotResult<()> {
    let collection = ctx.collection();
    if collection.disable_user_filter(false) {
        log::error!("User filter left disabled on {}", collection.name());
        return Err(PolyglotError::new(
            "User filter left disabled",
            ErrorKind::InvalidOperation,
        ));
    }
    Ok(())
}

/// Three pages written before localization was enabled:
///
/// ```text
/// root
/// ├── home   (global)
/// └── about  (global)
///     └── team (private)
/// ```
pub fn insert_legacy_pages(collection: &Collection) -> PolyglotResult<()> {
    let pages = vec![
        doc! {
            id: "home",
            text: "home",
            parentId: "root",
            orderValue: 1,
            workspace: "global",
            blockId: "b-home",
            title: "Welcome",
            tags: ["start", "main"],
            body: { intro: "Hello there", outro: "Bye" },
        },
        doc! {
            id: "about",
            text: "about",
            parentId: "root",
            orderValue: 2,
            workspace: "global",
            title: "About us",
        },
        doc! {
            id: "team",
            text: "team",
            parentId: "about",
            orderValue: 1,
            workspace: "private",
            title: "The team",
        },
    ];

    for page in pages {
        collection.create(page, &WriteOptions::default())?;
    }
    Ok(())
}

/// A page already localized in English (native), French and German.
pub fn localized_page(id: &str, parent_id: &str, order: i32) -> Document {
    doc! {
        id: id,
        text: id,
        parentId: parent_id,
        orderValue: order,
        workspace: "global",
        online: true,
        nativeLanguage: "en",
        i18n: {
            en: { title: "Hello", tags: ["a", "b"], body: { intro: "Welcome", outro: "Bye" }, locale: "en" },
            fr: { title: "Bonjour", tags: ["c"], body: { intro: "Bienvenue" }, locale: "fr" },
            de: { title: "Hallo", locale: "de" },
        },
    }
}

pub fn insert_localized_pages(collection: &Collection) -> PolyglotResult<()> {
    collection.create(localized_page("news", "root", 1), &WriteOptions::default())?;
    collection.create(localized_page("blog", "root", 2), &WriteOptions::default())?;
    collection.create(localized_page("post", "blog", 1), &WriteOptions::default())?;
    Ok(())
}

use polyglot::common::{sort_by, SortOrder, Value};
use polyglot::filter::field;
use polyglot_int_test::test_util::{
    cleanup, create_filtered_test_context, create_test_context, insert_legacy_pages,
    insert_localized_pages, run_test,
};

#[test]
fn test_read_child_resolves_children() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;
            let fr = ctx.pages_in("fr");

            let sort = sort_by("orderValue", SortOrder::Descending);
            let children = fr.read_child("root", None, Some(&sort))?;
            let ids: Vec<String> = children.iter().filter_map(|d| d.id()).collect();
            assert_eq!(ids, vec!["blog", "news"]);
            for child in &children {
                assert_eq!(child.get("title")?, Value::from("Bonjour"));
            }

            let children = fr.read_child("blog", Some(&field("online").eq(true)), None)?;
            assert_eq!(children.len(), 1);
            assert_eq!(children[0].get("title")?, Value::from("Bonjour"));

            assert!(fr.read_child("post", None, None)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_read_tree_returns_stored_nodes() {
    run_test(
        create_test_context,
        |ctx| {
            insert_localized_pages(&ctx.collection())?;

            let roots = ctx.pages_in("fr").read_tree(None)?;
            assert_eq!(roots.len(), 2);
            assert_eq!(roots[0].id(), Some("news".to_string()));
            assert_eq!(roots[1].id(), Some("blog".to_string()));

            // tree nodes are not localized
            assert!(!roots[0].contains_key("title"));
            assert_eq!(roots[1].get("children.0.id")?, Value::from("post"));
            assert_eq!(roots[1].get("children.0.i18n.fr.title")?, Value::from("Bonjour"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_read_tree_honours_user_filter() {
    run_test(
        create_filtered_test_context,
        |ctx| {
            insert_legacy_pages(&ctx.collection())?;

            let roots = ctx.pages().read_tree(None)?;
            assert_eq!(roots.len(), 2);
            assert_eq!(roots[1].id(), Some("about".to_string()));
            // the private child is hidden from this user
            assert_eq!(roots[1].get("children")?, Value::Array(vec![]));
            Ok(())
        },
        cleanup,
    )
}

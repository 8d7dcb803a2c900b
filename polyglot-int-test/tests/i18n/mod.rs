mod locale_context_test;
mod migration_test;

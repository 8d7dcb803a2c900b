// identity and tree fields
pub const DOC_ID: &str = "id";
pub const STORE_ID: &str = "_id";
pub const ID_LABEL: &str = "idLabel";
pub const PARENT_ID: &str = "parentId";
pub const ORDER_VALUE: &str = "orderValue";
pub const CHILDREN: &str = "children";
pub const ROOT_PARENT: &str = "root";
pub const TEXT: &str = "text";

// lifecycle fields
pub const CREATE_TIME: &str = "createTime";
pub const CREATE_USER: &str = "createUser";
pub const LAST_UPDATE_TIME: &str = "lastUpdateTime";
pub const LAST_UPDATE_USER: &str = "lastUpdateUser";
pub const LAST_PENDING_TIME: &str = "lastPendingTime";
pub const LAST_PENDING_USER: &str = "lastPendingUser";
pub const VERSION: &str = "version";
pub const ONLINE: &str = "online";
pub const WORKSPACE: &str = "workspace";

// localization fields
pub const NATIVE_LANGUAGE: &str = "nativeLanguage";
pub const I18N: &str = "i18n";
pub const LOCALE: &str = "locale";
pub const READ_ONLY: &str = "readOnly";

pub const DEFAULT_LOCALE: &str = "en";

/// Fields that never take part in localization, whatever the collection.
pub const GLOBAL_NON_LOCALIZABLE_FIELDS: [&str; 17] = [
    STORE_ID,
    DOC_ID,
    ID_LABEL,
    CREATE_TIME,
    CREATE_USER,
    LAST_UPDATE_TIME,
    LAST_UPDATE_USER,
    LAST_PENDING_TIME,
    LAST_PENDING_USER,
    VERSION,
    ONLINE,
    TEXT,
    NATIVE_LANGUAGE,
    I18N,
    WORKSPACE,
    ORDER_VALUE,
    PARENT_ID,
];

pub const FIELD_SEPARATOR: &str = ".";

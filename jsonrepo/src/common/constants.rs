// doc constants
pub const DOC_ID: &str = "_id";
pub const FIELD_SEPARATOR: char = '.';

// filter constants
pub const AND_OPERATOR: &str = "$and";
pub const OR_OPERATOR: &str = "$or";
pub const NOT_OPERATOR: &str = "$not";

// store constants
pub const DEFAULT_BASE_PATH: &str = "data/db";
pub const ENTITY_FILE_EXTENSION: &str = "json";
pub const BACKUP_FILE_SUFFIX: &str = ".backup";
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
pub const ENTITY_NAME_SEPARATOR: char = '/';

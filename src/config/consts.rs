// src/config/consts.rs

// Remote
pub const SEARCH_URL: &str =
    "https://vun.empleo.gob.mx/contenido/publico/segob/oferta/busquedaOfertas.jsf";
pub const REPAIR_URL_PREFIX: &str = "https://www.empleo.gob.mx/";
pub const REPAIR_URL_SUFFIX: &str = "-oferta-de-empleo-de-empleado-test-";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:61.0) Gecko/20100101 Firefox/61.0";
pub const FETCH_RETRIES: u32 = 3;
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// Search form
pub const REGION_SELECT_ID: &str = "domEntFed";
pub const SEARCH_BUTTON_VALUE: &str = "Buscar";
pub const LISTING_LINK_TEXT: &str = "Ver vacante";
pub const MAX_PAGES: u32 = 5;

// WebDriver (chromedriver)
pub const WEBDRIVER_URL: &str = "http://localhost:9515";
pub const IMPLICIT_WAIT_MS: u64 = 10_000;

// Politeness
pub const PAGE_DELAY_MS: u64 = 3_000;
pub const ITEM_DELAY_MS: u64 = 500;
pub const REPAIR_DELAY_MS: u64 = 1_000;

// Repair
pub const MIN_DOCUMENT_BYTES: u64 = 20_000;
pub const ERROR_MARKER: &str = "Error 404";

// Local files
pub const STORE_DIR: &str = "states";
pub const COMPLETION_LOG_FILE: &str = "log.txt";
pub const DEBUG_LOG_FILE: &str = "debug.log";
pub const DATASET_FILE: &str = "data.csv";

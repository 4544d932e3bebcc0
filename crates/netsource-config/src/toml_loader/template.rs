//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# NetSource Configuration
# Only override what you want to change -- missing fields use defaults.

# system_prompt = "You are NetSourceAI, a research assistant. ..."

[model]
# name = "gpt-4o-mini"
# base_url = "https://api.openai.com/v1"   # any OpenAI-compatible endpoint
# api_key = ""                # empty: read NETSOURCE_API_KEY, then OPENAI_API_KEY
# default_temperature = 0.7   # 0.0-2.0
# request_timeout_secs = 120  # 1-600

[search]
# max_results = 5             # 1-25 web results
# num_sentences = 3           # 1-20 sentences per page summary
# wikipedia_lang = "en"
# wikipedia_pages = 3         # 1-10
# safesearch = "moderate"     # on, moderate, off
# fetch_timeout_secs = 10     # 1-120

[tools]
# definitions_path = "tools_definition.json"   # unset: built-in catalogue
# parallel = false

[ui]
# app_title = "NetSourceAI"
# sound_enabled = false

[speech]
# command = "espeak"          # reads the answer on stdin
# args = []

[logging]
# level = "info"              # trace, debug, info, warn, error
"##
    .to_string()
}

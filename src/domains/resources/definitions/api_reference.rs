//! e-Stat API reference resource definition.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

const API_REFERENCE: &str = r#"# e-Stat API quick reference

All tools call the e-Stat REST API 3.0 with a single GET and return the raw
response. Failures come back as a JSON payload:
`{"ERROR": "...", "status": "timeout|connection_error|http_error|unknown_error", "status_code": 404}`
(`status_code` only for `http_error`).

| Tool | Endpoint | Arguments |
|---|---|---|
| search_e_stat_tables | getStatsList | search_word, surveyYears, startPosition = 1, limit = 100 |
| get_e_stat_meta_info | getMetaInfo | stats_data_id |
| get_specific_e_stat_data | getSimpleStatsData | data_set_id OR stats_data_id, startPosition = 1, limit = 100 |
| get_e_stat_ref_dataset | refDataset | data_set_id |
| get_e_stat_data_catalog | getDataCatalog | search_word, surveyYears, startPosition = 1, limit = 100 |

## search_word

Free text. Combine words with `AND`, `OR` or `NOT`:
`東京 AND 人口`, `東京 OR 大阪`.

## surveyYears

- `yyyy` - one year, e.g. `2023`
- `yyyymm` - one month, e.g. `202301`
- `yyyymm-yyyymm` - a month range, e.g. `202301-202312`

## Paging

`startPosition` is 1-based. With `limit = 100`, use `startPosition = 101`
for the second page.

## Identifiers

- `stats_data_id` (統計表ID): one published statistics table, e.g. `0000010201`.
- `data_set_id` (データセットID): a registered, pre-filtered extract.

`get_specific_e_stat_data` needs exactly one of the two.
"#;

/// Static reference for the e-Stat tools.
pub struct ApiReferenceResource;

impl ResourceDefinition for ApiReferenceResource {
    const URI: &'static str = "estat://docs/api";
    const NAME: &'static str = "e-Stat API Reference";
    const DESCRIPTION: &'static str =
        "Endpoints, argument formats and paging rules of the e-Stat tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(API_REFERENCE.to_string())
    }
}

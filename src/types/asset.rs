use serde::Deserialize;

// Asset-indexer JSON-RPC response, reduced to the fields the ownership
// scan reads.

#[derive(Debug, Deserialize)]
pub struct AssetsByOwnerBody {
    #[serde(default)]
    pub result: Option<AssetPage>,
    #[serde(default)]
    pub error: Option<IndexerError>,
}

#[derive(Debug, Deserialize)]
pub struct IndexerError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub items: Vec<AssetItem>,
}

#[derive(Debug, Deserialize)]
pub struct AssetItem {
    pub id: String,
    #[serde(default)]
    pub grouping: Vec<AssetGrouping>,
}

#[derive(Debug, Deserialize)]
pub struct AssetGrouping {
    pub group_key: String,
    pub group_value: String,
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::collector::ResourceDiscovery;
use crate::error::AppResult;
use crate::metrics::ResourceId;

use super::client::JsonRpcClient;

const LIST_TABLES: &str = "ListTables";
const DESCRIBE_TABLE: &str = "DescribeTable";
const LIST_TABLES_PAGE: u32 = 100;
/// Guards against an endpoint that keeps returning the same page token.
const MAX_LIST_PAGES: usize = 1_000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ListTablesInput<'page> {
    #[serde(skip_serializing_if = "Option::is_none")]
    exclusive_start_table_name: Option<&'page str>,
    limit: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ListTablesOutput {
    #[serde(default)]
    pub table_names: Vec<String>,
    pub last_evaluated_table_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeTableInput<'table> {
    table_name: &'table str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct DescribeTableOutput {
    pub table: Option<TableDescription>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct TableDescription {
    #[serde(default)]
    pub global_secondary_indexes: Vec<IndexDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct IndexDescription {
    pub index_name: String,
}

impl DescribeTableOutput {
    pub(super) fn index_names(self) -> Vec<String> {
        self.table
            .map(|table| {
                table
                    .global_secondary_indexes
                    .into_iter()
                    .map(|index| index.index_name)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// DynamoDB control plane as a [`ResourceDiscovery`].
#[derive(Debug, Clone)]
pub struct DynamoDbClient {
    rpc: JsonRpcClient,
}

impl DynamoDbClient {
    pub(crate) const fn new(rpc: JsonRpcClient) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl ResourceDiscovery for DynamoDbClient {
    async fn list_resources(&self) -> AppResult<Vec<ResourceId>> {
        let mut tables = Vec::new();
        let mut start: Option<String> = None;
        for _ in 0..MAX_LIST_PAGES {
            let input = ListTablesInput {
                exclusive_start_table_name: start.as_deref(),
                limit: LIST_TABLES_PAGE,
            };
            let page: ListTablesOutput = self.rpc.call(LIST_TABLES, &input).await?;
            tables.extend(page.table_names.into_iter().map(ResourceId::new));
            match page.last_evaluated_table_name {
                Some(next) if start.as_deref() != Some(next.as_str()) => start = Some(next),
                Some(_) | None => return Ok(tables),
            }
        }
        warn!(
            "ListTables did not finish after {} pages; using {} tables",
            MAX_LIST_PAGES,
            tables.len()
        );
        Ok(tables)
    }

    async fn list_secondary_indexes(&self, resource: &ResourceId) -> AppResult<Vec<String>> {
        let input = DescribeTableInput {
            table_name: resource.as_str(),
        };
        let output: DescribeTableOutput = self.rpc.call(DESCRIBE_TABLE, &input).await?;
        Ok(output.index_names())
    }
}

//! Marketplace GraphQL operations.
//!
//! Two named operations are consumed: `GetAxieDetail` (one creature's genome
//! and owner data by id) and `GetAxieBriefList` (up-to-N for-sale creatures
//! matching a class + parts criteria, ascending by price). Query documents
//! are trimmed to the fields this crate consumes.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::error::RequestError;
use crate::genes::{CreatureSignature, Genome};

use super::client::ApiClient;

const AXIE_DETAIL_QUERY: &str = "\
query GetAxieDetail($axieId: ID!) {
  axie(axieId: $axieId) {
    id
    class
    name
    genes
    newGenes
    owner
    order { id currentPrice currentPriceUsd }
  }
}";

const AXIE_BRIEF_LIST_QUERY: &str = "\
query GetAxieBriefList($auctionType: AuctionType, $criteria: AxieSearchCriteria, $from: Int, $sort: SortBy, $size: Int) {
  axies(auctionType: $auctionType, criteria: $criteria, from: $from, sort: $sort, size: $size) {
    total
    results {
      id
      class
      order { id currentPrice currentPriceUsd }
    }
  }
}";

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AxieDetailData {
    axie: AxieDetail,
}

/// One creature's detail as returned by `GetAxieDetail`.
#[derive(Debug, Clone, Deserialize)]
pub struct AxieDetail {
    /// Axie id.
    pub id: String,
    /// 512-bit genome.
    #[serde(rename = "newGenes")]
    pub new_genes: Genome,
    /// Current owner address, when reported.
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BriefListData {
    axies: BriefList,
}

#[derive(Debug, Deserialize)]
struct BriefList {
    total: u64,
    results: Vec<AxieBrief>,
}

#[derive(Debug, Deserialize)]
struct AxieBrief {
    id: String,
    #[serde(default)]
    order: Option<SaleOrder>,
}

#[derive(Debug, Deserialize)]
struct SaleOrder {
    #[serde(rename = "currentPriceUsd", with = "rust_decimal::serde::str")]
    current_price_usd: Decimal,
}

/// The cheapest (or any) marketplace listing matching a signature.
/// Transient; not cached across signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwinListing {
    /// Listed axie id.
    pub listing_id: String,
    /// Current listing price in USD, 2 decimal places.
    pub price: Decimal,
}

/// Result page of a twin search. `total` counts all matches on the
/// marketplace, independent of the requested page size.
#[derive(Debug, Clone, Default)]
pub struct TwinSearch {
    /// Total matches marketplace-wide.
    pub total: u64,
    /// Up to the requested number of listings, ascending by price.
    pub listings: Vec<TwinListing>,
}

/// Fetch one creature's genome by id.
pub async fn fetch_genome(client: &ApiClient, axie_id: u64) -> Result<Genome, RequestError> {
    let body = json!({
        "operationName": "GetAxieDetail",
        "variables": { "axieId": axie_id },
        "query": AXIE_DETAIL_QUERY,
    });

    let response: GraphQlResponse<AxieDetailData> =
        client.post_graphql(&body, "axie-detail").await?;

    Ok(response.data.axie.new_genes)
}

/// Search currently-for-sale creatures matching `signature`, ascending by
/// price, returning at most `size` listings.
pub async fn search_twins(
    client: &ApiClient,
    signature: &CreatureSignature,
    size: u32,
) -> Result<TwinSearch, RequestError> {
    let body = json!({
        "operationName": "GetAxieBriefList",
        "variables": {
            "from": 0,
            "size": size,
            "sort": "PriceAsc",
            "auctionType": "Sale",
            "criteria": {
                "parts": signature.part_ids(),
                "classes": [signature.class.to_string()],
            },
        },
        "query": AXIE_BRIEF_LIST_QUERY,
    });

    let response: GraphQlResponse<BriefListData> =
        client.post_graphql(&body, "twin-search").await?;

    let page = response.data.axies;
    let listings = page
        .results
        .into_iter()
        .filter_map(|brief| {
            brief.order.map(|order| TwinListing {
                listing_id: brief.id,
                price: order.current_price_usd,
            })
        })
        .collect();

    Ok(TwinSearch {
        total: page.total,
        listings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_brief_list_envelope() {
        let payload = serde_json::json!({
            "data": {
                "axies": {
                    "total": 2,
                    "results": [
                        {"id": "11590630", "class": "Beast",
                         "order": {"id": "o1", "currentPrice": "12000000", "currentPriceUsd": "34.56"}},
                        {"id": "11620288", "class": "Beast",
                         "order": {"id": "o2", "currentPrice": "13000000", "currentPriceUsd": "40.00"}}
                    ]
                }
            }
        });

        let response: GraphQlResponse<BriefListData> = serde_json::from_value(payload).unwrap();
        assert_eq!(response.data.axies.total, 2);
        assert_eq!(
            response.data.axies.results[0]
                .order
                .as_ref()
                .unwrap()
                .current_price_usd,
            dec!(34.56)
        );
    }

    #[test]
    fn deserializes_detail_envelope() {
        let payload = serde_json::json!({
            "data": {
                "axie": {
                    "id": "1601978",
                    "class": "Aquatic",
                    "name": "Sushi",
                    "genes": "0x1234",
                    "newGenes": "0xabcd",
                    "owner": "0xowner"
                }
            }
        });

        let response: GraphQlResponse<AxieDetailData> = serde_json::from_value(payload).unwrap();
        assert_eq!(response.data.axie.new_genes.as_str(), "0xabcd");
        assert_eq!(response.data.axie.owner.as_deref(), Some("0xowner"));
    }

    #[test]
    fn missing_envelope_field_is_a_parse_error() {
        let payload = serde_json::json!({ "data": { "axie": null } });
        let result: Result<GraphQlResponse<AxieDetailData>, _> =
            serde_json::from_value(payload);
        assert!(result.is_err());
    }

    #[test]
    fn unlisted_briefs_carry_no_order() {
        let payload = serde_json::json!({
            "data": {
                "axies": {
                    "total": 1,
                    "results": [{"id": "77", "class": "Bug"}]
                }
            }
        });

        let response: GraphQlResponse<BriefListData> = serde_json::from_value(payload).unwrap();
        assert!(response.data.axies.results[0].order.is_none());
    }
}

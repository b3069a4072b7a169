//! JSON wire format of the list check operation

use compliance_bench_core::{
    CheckFilter, ChunkResponse, DecodeError, EncodeError, InputRecord, MatchRecord,
    RequestEncoder, ResponseDecoder,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CheckListRequest<'a> {
    input: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a [String]>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckListResponse {
    simple_responses: Option<Vec<Vec<MatchRecord>>>,
}

/// Encodes a chunk as `{"input": [...], "date": ..., "categories": [...]}`
///
/// Unset filter fields are left out of the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRequestEncoder;

impl JsonRequestEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self
    }
}

impl RequestEncoder for JsonRequestEncoder {
    fn name(&self) -> &str {
        "json"
    }

    fn encode(&self, records: &[&InputRecord], filter: &CheckFilter) -> Result<String, EncodeError> {
        let mut input = Vec::with_capacity(records.len());
        for record in records {
            if record.source.trim().is_empty() {
                return Err(EncodeError::InvalidRecord {
                    index: record.index,
                    reason: "record is blank".into(),
                });
            }
            input.push(record.source.as_str());
        }

        let request = CheckListRequest {
            input,
            date: filter.date.as_deref(),
            categories: filter.categories.as_deref(),
        };

        Ok(serde_json::to_string(&request)?)
    }
}

/// Decodes `{"simpleResponses": [[...], ...]}` into per-record match lists
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseDecoder;

impl JsonResponseDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }
}

impl ResponseDecoder for JsonResponseDecoder {
    fn name(&self) -> &str {
        "json"
    }

    fn decode(&self, body: &str) -> Result<ChunkResponse, DecodeError> {
        let response: CheckListResponse = serde_json::from_str(body)?;
        let results = response
            .simple_responses
            .ok_or_else(|| DecodeError::Shape("missing simpleResponses".into()))?;
        Ok(ChunkResponse::new(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliance_bench_core::{Classification, ClassificationResult};

    fn records(sources: &[&str]) -> Vec<InputRecord> {
        sources
            .iter()
            .enumerate()
            .map(|(idx, s)| InputRecord::new(idx, *s))
            .collect()
    }

    #[test]
    fn test_encode_without_filter() {
        let owned = records(&["CCO", "c1ccccc1"]);
        let chunk: Vec<&InputRecord> = owned.iter().collect();

        let body = JsonRequestEncoder::new()
            .encode(&chunk, &CheckFilter::none())
            .unwrap();

        assert_eq!(body, r#"{"input":["CCO","c1ccccc1"]}"#);
    }

    #[test]
    fn test_encode_with_filter() {
        let owned = records(&["CN"]);
        let chunk: Vec<&InputRecord> = owned.iter().collect();
        let filter = CheckFilter::none()
            .with_date("2017-05-01")
            .with_categories(["Narcotics"]);

        let body = JsonRequestEncoder::new().encode(&chunk, &filter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["input"][0], "CN");
        assert_eq!(value["date"], "2017-05-01");
        assert_eq!(value["categories"][0], "Narcotics");
    }

    #[test]
    fn test_encode_keeps_multiline_records() {
        let block = "\n  Mrv\n\n  1  0  0\nM  END\n";
        let owned = records(&[block]);
        let chunk: Vec<&InputRecord> = owned.iter().collect();

        let body = JsonRequestEncoder::new()
            .encode(&chunk, &CheckFilter::none())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["input"][0], block);
    }

    #[test]
    fn test_encode_rejects_blank_record() {
        let owned = records(&["CCO", "  "]);
        let chunk: Vec<&InputRecord> = owned.iter().collect();

        let err = JsonRequestEncoder::new()
            .encode(&chunk, &CheckFilter::none())
            .unwrap_err();
        assert!(matches!(err, EncodeError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn test_decode_simple_responses() {
        let body = r#"{
            "simpleResponses": [
                [],
                [{"error": true, "errorMessage": "Cannot parse"}],
                [
                    {"categoryName": "Narcotics", "molName": "Cocaine", "casNubmers": ["50-36-2"]},
                    {"categoryName": "Precursors"}
                ]
            ]
        }"#;

        let response = JsonResponseDecoder::new().decode(body).unwrap();
        assert_eq!(response.len(), 3);
        assert_eq!(Classification::of(&response.results[0]), Classification::Passed);
        assert_eq!(Classification::of(&response.results[1]), Classification::Error);
        assert_eq!(Classification::of(&response.results[2]), Classification::Hit(2));

        let result = ClassificationResult::from_response(&response);
        assert_eq!(result.hit_size(), 2);
        assert_eq!(
            response.results[2][0].cas_numbers,
            vec!["50-36-2".to_string()]
        );
    }

    #[test]
    fn test_decode_missing_simple_responses() {
        let err = JsonResponseDecoder::new().decode("{}").unwrap_err();
        assert!(matches!(err, DecodeError::Shape(_)));
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = JsonResponseDecoder::new()
            .decode("<html>Unauthorized</html>")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}

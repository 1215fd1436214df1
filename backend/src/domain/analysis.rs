//! Clinical analysis shapes and Israeli-context enrichment rules.
//!
//! The analyzer service owns the clinical NLP. This module only describes the
//! payload it returns, validates what we forward to it, and appends the fixed
//! Israeli guideline and recommendation lines the portal shows residents.
//!
//! [`ClinicalAnalysis`] keeps the analyzer payload verbatim, so the portal
//! response is the analyzer response plus `israeliContext`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimum number of characters accepted as clinical text.
pub const MIN_CLINICAL_TEXT_CHARS: usize = 5;

const SENIOR_CONSULT_GUIDELINE: &str =
    "יש לשקול התייעצות עם גריאטר בכיר על פי הנחיות משרד הבריאות";
const FALLS_GUIDELINE: &str =
    "הנחיות האגודה הגריאטרית הישראלית למניעת נפילות - יישום פרוטוקול STEADI";
const COGNITIVE_GUIDELINE: &str = "הערכה קוגניטיבית מעמיקה על פי פרוטוקול בית החולים הגריאטרי";
const MULTIDISCIPLINARY_RECOMMENDATION: &str = "יש לתאם המלצות עם הצוות הרב-מקצועי במחלקה";
const FAMILY_PHYSICIAN_RECOMMENDATION: &str = "מומלץ לעדכן רופא המשפחה על המלצות הטיפול";

/// MMSE scores below this threshold trigger the cognitive guideline.
const MMSE_COGNITIVE_THRESHOLD: f64 = 24.0;

const HIGH_RISK_CATEGORY: &str = "high";

const ISRAELI_CONTEXT_KEY: &str = "israeliContext";

/// Analysis flavour requested from the analyzer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTask {
    /// Full geriatric assessment.
    #[default]
    Comprehensive,
    /// Medication review.
    Medication,
    /// Cognitive screening.
    Cognitive,
    /// Falls risk.
    Falls,
    /// Nutrition.
    Nutrition,
}

impl AnalysisTask {
    /// Every supported task in wire order.
    pub const ALL: [Self; 5] = [
        Self::Comprehensive,
        Self::Medication,
        Self::Cognitive,
        Self::Falls,
        Self::Nutrition,
    ];

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Medication => "medication",
            Self::Cognitive => "cognitive",
            Self::Falls => "falls",
            Self::Nutrition => "nutrition",
        }
    }

    /// Parse the wire representation.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::domain::AnalysisTask;
    ///
    /// assert_eq!(AnalysisTask::parse("falls"), Some(AnalysisTask::Falls));
    /// assert_eq!(AnalysisTask::parse("surgery"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|task| task.as_str() == raw)
    }
}

impl fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised while building an [`AnalyzeRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeRequestValidationError {
    /// `clinical_text` was not supplied.
    #[error("missing required field: clinical_text")]
    MissingClinicalText,
    /// `clinical_text` is shorter than [`MIN_CLINICAL_TEXT_CHARS`].
    #[error("Clinical text must be at least 5 characters")]
    ClinicalTextTooShort,
    /// `task` is not one of [`AnalysisTask::ALL`].
    #[error("Invalid task: expected one of comprehensive, medication, cognitive, falls, nutrition")]
    UnknownTask {
        /// Rejected value.
        value: String,
    },
}

/// Validated analysis request forwarded to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    clinical_text: String,
    task: AnalysisTask,
}

impl AnalyzeRequest {
    /// Validate raw request parts. Only the first failure is reported.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::domain::{AnalysisTask, AnalyzeRequest};
    ///
    /// let request = AnalyzeRequest::try_from_parts(Some("Patient, 82, recurrent falls"), None)
    ///     .expect("valid request");
    /// assert_eq!(request.task(), AnalysisTask::Comprehensive);
    /// ```
    pub fn try_from_parts(
        clinical_text: Option<&str>,
        task: Option<&str>,
    ) -> Result<Self, AnalyzeRequestValidationError> {
        let clinical_text = clinical_text.ok_or(AnalyzeRequestValidationError::MissingClinicalText)?;
        if clinical_text.chars().count() < MIN_CLINICAL_TEXT_CHARS {
            return Err(AnalyzeRequestValidationError::ClinicalTextTooShort);
        }
        let task = match task {
            None => AnalysisTask::default(),
            Some(raw) => AnalysisTask::parse(raw).ok_or_else(|| {
                AnalyzeRequestValidationError::UnknownTask {
                    value: raw.to_owned(),
                }
            })?,
        };
        Ok(Self {
            clinical_text: clinical_text.to_owned(),
            task,
        })
    }

    /// Clinical narrative to analyse.
    pub fn clinical_text(&self) -> &str {
        self.clinical_text.as_str()
    }

    /// Requested analysis flavour.
    pub fn task(&self) -> AnalysisTask {
        self.task
    }
}

/// Analyzer response, kept verbatim.
///
/// The analyzer owns the shape of its payload. The portal reads the few fields
/// its guideline rules need and re-emits every field exactly as received, so
/// nested keys, enum values and integer scores pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicalAnalysis(Map<String, Value>);

impl ClinicalAnalysis {
    /// Wrap an analyzer JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Every analyzer field.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Raw top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a top-level field.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Task echoed by the analyzer.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::domain::ClinicalAnalysis;
    /// use serde_json::json;
    ///
    /// let analysis: ClinicalAnalysis =
    ///     serde_json::from_value(json!({ "task": "falls" })).expect("object payload");
    /// assert_eq!(analysis.task(), Some("falls"));
    /// ```
    pub fn task(&self) -> Option<&str> {
        self.get("task").and_then(Value::as_str)
    }

    /// `riskAssessment.overall.category`, when it is a string.
    pub fn overall_risk_category(&self) -> Option<&str> {
        self.get("riskAssessment")?
            .get("overall")?
            .get("category")?
            .as_str()
    }

    /// Text of every `patientData.symptoms[].symptom` that is a string.
    pub fn symptom_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.get("patientData")
            .and_then(|data| data.get("symptoms"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|symptom| symptom.get("symptom").and_then(Value::as_str))
    }

    /// MMSE score as the cognitive rule reads it.
    ///
    /// A zero number counts as absent. Strings count when they hold a number,
    /// so `"18"` reads as 18 and `"18/30"` as absent.
    pub fn mmse(&self) -> Option<f64> {
        match self.get("scores")?.get("mmse")? {
            Value::Number(number) => number.as_f64().filter(|score| *score != 0.0),
            Value::String(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|score| score.is_finite()),
            _ => None,
        }
    }

    /// Analyzer recommendations. A missing or non-array value reads as empty;
    /// non-string entries are skipped.
    pub fn recommendations(&self) -> Vec<String> {
        self.get("recommendations")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    }
}

impl From<Map<String, Value>> for ClinicalAnalysis {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn mentions_falls(symptom: &str) -> bool {
    symptom.contains("falls") || symptom.contains("נפילות")
}

/// Israeli guideline lines applicable to an analysis, in display order.
///
/// A zero MMSE score counts as absent; see [`ClinicalAnalysis::mmse`].
pub fn israeli_guidelines(analysis: &ClinicalAnalysis) -> Vec<String> {
    let mut guidelines = Vec::new();

    if analysis.overall_risk_category() == Some(HIGH_RISK_CATEGORY) {
        guidelines.push(SENIOR_CONSULT_GUIDELINE.to_owned());
    }

    if analysis.symptom_texts().any(mentions_falls) {
        guidelines.push(FALLS_GUIDELINE.to_owned());
    }

    if analysis
        .mmse()
        .is_some_and(|score| score < MMSE_COGNITIVE_THRESHOLD)
    {
        guidelines.push(COGNITIVE_GUIDELINE.to_owned());
    }

    guidelines
}

/// Append the Israeli healthcare-system recommendations.
///
/// # Examples
/// ```
/// use geriatrics_portal::domain::enhance_with_israeli_standards;
///
/// let enhanced = enhance_with_israeli_standards(&["Review anticoagulation".to_owned()]);
/// assert_eq!(enhanced.len(), 3);
/// assert_eq!(enhanced[0], "Review anticoagulation");
/// ```
pub fn enhance_with_israeli_standards(recommendations: &[String]) -> Vec<String> {
    let mut enhanced = recommendations.to_vec();
    enhanced.push(MULTIDISCIPLINARY_RECOMMENDATION.to_owned());
    enhanced.push(FAMILY_PHYSICIAN_RECOMMENDATION.to_owned());
    enhanced
}

/// Locally derived context appended to the analyzer response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsraeliContext {
    pub guidelines: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Analyzer response plus the Israeli context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAnalysis {
    #[serde(flatten)]
    pub analysis: ClinicalAnalysis,
    pub israeli_context: IsraeliContext,
}

impl EnhancedAnalysis {
    /// Enrich an analyzer response. An `israeliContext` sent by the analyzer
    /// is replaced by the locally derived one.
    pub fn from_analysis(mut analysis: ClinicalAnalysis) -> Self {
        analysis.0.remove(ISRAELI_CONTEXT_KEY);
        let israeli_context = IsraeliContext {
            guidelines: israeli_guidelines(&analysis),
            recommendations: enhance_with_israeli_standards(&analysis.recommendations()),
        };
        Self {
            analysis,
            israeli_context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn analysis_from(value: Value) -> ClinicalAnalysis {
        serde_json::from_value(value).expect("analysis should decode")
    }

    #[rstest]
    #[case::missing(None, None, AnalyzeRequestValidationError::MissingClinicalText)]
    #[case::short(Some("abcd"), None, AnalyzeRequestValidationError::ClinicalTextTooShort)]
    #[case::short_wins_over_task(
        Some("ab"),
        Some("surgery"),
        AnalyzeRequestValidationError::ClinicalTextTooShort
    )]
    #[case::unknown_task(
        Some("82 year old with falls"),
        Some("surgery"),
        AnalyzeRequestValidationError::UnknownTask { value: "surgery".to_owned() }
    )]
    fn rejects_invalid_requests(
        #[case] text: Option<&str>,
        #[case] task: Option<&str>,
        #[case] expected: AnalyzeRequestValidationError,
    ) {
        assert_eq!(AnalyzeRequest::try_from_parts(text, task), Err(expected));
    }

    #[rstest]
    fn counts_hebrew_characters_not_bytes() {
        // Five Hebrew letters are ten UTF-8 bytes.
        let request = AnalyzeRequest::try_from_parts(Some("נפילה"), Some("falls"))
            .expect("five characters are enough");
        assert_eq!(request.task(), AnalysisTask::Falls);
        assert!(AnalyzeRequest::try_from_parts(Some("נפיל"), None).is_err());
    }

    #[rstest]
    fn high_risk_falls_and_low_mmse_trigger_all_guidelines() {
        let analysis = analysis_from(json!({
            "patientData": {
                "symptoms": [{ "symptom": "recurrent falls", "mentions": 2 }],
                "medications": []
            },
            "scores": { "mmse": 18, "barthel": 55 },
            "riskAssessment": { "overall": { "category": "high", "score": 8, "factors": [] } }
        }));

        assert_eq!(
            israeli_guidelines(&analysis),
            vec![
                SENIOR_CONSULT_GUIDELINE.to_owned(),
                FALLS_GUIDELINE.to_owned(),
                COGNITIVE_GUIDELINE.to_owned(),
            ]
        );
    }

    #[rstest]
    #[case::hebrew_falls(json!({ "patientData": { "symptoms": [{ "symptom": "נפילות חוזרות", "mentions": 1 }] } }), vec![FALLS_GUIDELINE])]
    #[case::moderate_risk(json!({ "riskAssessment": { "overall": { "category": "moderate", "score": 4 } } }), vec![])]
    #[case::mmse_at_threshold(json!({ "scores": { "mmse": 24 } }), vec![])]
    #[case::mmse_zero_is_absent(json!({ "scores": { "mmse": 0 } }), vec![])]
    #[case::mmse_non_numeric(json!({ "scores": { "mmse": "18/30" } }), vec![])]
    #[case::mmse_numeric_string(json!({ "scores": { "mmse": "18" } }), vec![COGNITIVE_GUIDELINE])]
    #[case::symptoms_null(json!({ "patientData": { "symptoms": null } }), vec![])]
    #[case::symptom_without_text(json!({ "patientData": { "symptoms": [{ "mentions": 3 }] } }), vec![])]
    #[case::unknown_risk_category(json!({ "riskAssessment": { "overall": { "category": "extreme" } } }), vec![])]
    #[case::empty(json!({}), vec![])]
    fn guideline_rules(#[case] payload: Value, #[case] expected: Vec<&str>) {
        let analysis = analysis_from(payload);
        assert_eq!(israeli_guidelines(&analysis), expected);
    }

    #[rstest]
    fn enhanced_analysis_preserves_unknown_fields() {
        let analysis = analysis_from(json!({
            "task": "comprehensive",
            "fallback": false,
            "recommendations": ["Stop benzodiazepines"],
            "modelVersion": "2.1",
            "israeliContext": { "guidelines": ["stale"] }
        }));

        let enhanced = EnhancedAnalysis::from_analysis(analysis);
        let value = serde_json::to_value(&enhanced).expect("serialise");

        assert_eq!(value["modelVersion"], json!("2.1"));
        assert_eq!(value["task"], json!("comprehensive"));
        assert_eq!(value["recommendations"], json!(["Stop benzodiazepines"]));
        assert_eq!(value["israeliContext"]["guidelines"], json!([]));
        assert_eq!(
            value["israeliContext"]["recommendations"],
            json!([
                "Stop benzodiazepines",
                MULTIDISCIPLINARY_RECOMMENDATION,
                FAMILY_PHYSICIAN_RECOMMENDATION
            ])
        );
        assert!(value.get("patientData").is_none());
    }

    #[rstest]
    fn analyzer_payload_passes_through_verbatim() {
        let payload = json!({
            "task": "comprehensive",
            "patientData": {
                "symptoms": [
                    { "symptom": "falls", "hebrew": "נפילות", "mentions": 2, "severity": "critical" }
                ],
                "vitals": { "bp": "150/90" }
            },
            "scores": { "mmse": 22, "barthel": 55 },
            "riskAssessment": {
                "overall": { "category": "high", "score": 8, "factors": [] },
                "falls": { "category": "high", "score": 7 }
            },
            "clinicalAlerts": [
                { "type": "delirium", "message": "Acute confusion", "severity": "urgent" }
            ],
            "recommendations": ["Medication review"]
        });
        let analysis = analysis_from(payload.clone());

        let enhanced = EnhancedAnalysis::from_analysis(analysis);
        let value = serde_json::to_value(&enhanced).expect("serialise");

        let mut expected = payload;
        expected["israeliContext"] = json!({
            "guidelines": [SENIOR_CONSULT_GUIDELINE, FALLS_GUIDELINE, COGNITIVE_GUIDELINE],
            "recommendations": [
                "Medication review",
                MULTIDISCIPLINARY_RECOMMENDATION,
                FAMILY_PHYSICIAN_RECOMMENDATION
            ],
        });
        assert_eq!(value, expected);
        assert!(value["riskAssessment"]["overall"]["score"].is_u64());
        assert!(value["patientData"].get("medications").is_none());
    }

    #[rstest]
    fn non_string_recommendations_are_skipped() {
        let analysis = analysis_from(json!({ "recommendations": ["Hydration", 7, null] }));
        assert_eq!(analysis.recommendations(), vec!["Hydration".to_owned()]);
    }

    #[rstest]
    fn non_object_payload_is_rejected() {
        assert!(serde_json::from_value::<ClinicalAnalysis>(json!(["falls"])).is_err());
    }

    #[rstest]
    fn missing_recommendations_still_gain_local_lines() {
        let enhanced = EnhancedAnalysis::from_analysis(ClinicalAnalysis::default());
        assert_eq!(enhanced.israeli_context.recommendations.len(), 2);
    }
}

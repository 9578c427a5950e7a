//! Task (HIT) definitions.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::Params;
use crate::error::{Error, Result};

/// System qualification: percent of a worker's assignments that were approved.
pub const APPROVAL_PERCENT_QUALIFICATION: &str = "000000000000000000L0";

/// System qualification: number of assignments a worker has had approved.
pub const APPROVED_COUNT_QUALIFICATION: &str = "00000000000000000040";

/// System qualification: worker locale.
pub const LOCALE_QUALIFICATION: &str = "00000000000000000071";

const EXTERNAL_QUESTION_SCHEMA: &str =
    "http://mechanicalturk.amazonaws.com/AWSMechanicalTurkDataSchemas/2006-07-14/ExternalQuestion.xsd";

/// Comparison applied by a qualification requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparator {
    GreaterThanOrEqualTo,
    EqualTo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Locale {
    pub country: String,
}

/// Worker eligibility filter attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QualificationRequirement {
    pub qualification_type_id: String,
    pub comparator: Comparator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_values: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_values: Option<Vec<Locale>>,
}

impl QualificationRequirement {
    fn at_least(type_id: &str, value: u32) -> Self {
        Self {
            qualification_type_id: type_id.to_string(),
            comparator: Comparator::GreaterThanOrEqualTo,
            integer_values: Some(vec![i64::from(value)]),
            locale_values: None,
        }
    }

    fn in_country(country: &str) -> Self {
        Self {
            qualification_type_id: LOCALE_QUALIFICATION.to_string(),
            comparator: Comparator::EqualTo,
            integer_values: None,
            locale_values: Some(vec![Locale {
                country: country.to_string(),
            }]),
        }
    }
}

/// A task to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHit {
    pub title: String,
    pub description: String,
    /// Page under the callback host that renders the task.
    pub page: String,
    /// Reward in USD.
    pub reward: f64,
    /// Seconds a worker has to finish an assignment.
    pub duration: u64,
    /// Seconds the task stays available.
    pub lifetime: u64,
    pub keywords: String,
    /// Seconds before submitted work is approved automatically.
    pub auto_approve: u64,
    pub frame_height: u32,
    pub min_approval_percent: Option<u32>,
    /// Minimum number of approved assignments.
    pub min_approved_amount: Option<u32>,
    pub country_code: Option<String>,
}

impl NewHit {
    pub fn new(
        title: &str,
        description: &str,
        page: &str,
        reward: f64,
        duration: u64,
        lifetime: u64,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            page: page.to_string(),
            reward,
            duration,
            lifetime,
            keywords: String::new(),
            auto_approve: 604_800,
            frame_height: 650,
            min_approval_percent: None,
            min_approved_amount: None,
            country_code: None,
        }
    }

    #[must_use]
    pub fn keywords(mut self, keywords: &str) -> Self {
        self.keywords = keywords.to_string();
        self
    }

    #[must_use]
    pub fn auto_approve(mut self, seconds: u64) -> Self {
        self.auto_approve = seconds;
        self
    }

    #[must_use]
    pub fn frame_height(mut self, height: u32) -> Self {
        self.frame_height = height;
        self
    }

    #[must_use]
    pub fn min_approval_percent(mut self, percent: u32) -> Self {
        self.min_approval_percent = Some(percent);
        self
    }

    #[must_use]
    pub fn min_approved_amount(mut self, amount: u32) -> Self {
        self.min_approved_amount = Some(amount);
        self
    }

    #[must_use]
    pub fn country_code(mut self, country: &str) -> Self {
        self.country_code = Some(country.to_string());
        self
    }

    /// Requirements for the optional filters that are set, in fixed order:
    /// approval percent, approved count, locale. Zero and empty count as unset.
    pub fn qualification_requirements(&self) -> Vec<QualificationRequirement> {
        let mut quals = Vec::new();

        if let Some(percent) = self.min_approval_percent.filter(|p| *p > 0) {
            quals.push(QualificationRequirement::at_least(
                APPROVAL_PERCENT_QUALIFICATION,
                percent,
            ));
        }

        if let Some(amount) = self.min_approved_amount.filter(|a| *a > 0) {
            quals.push(QualificationRequirement::at_least(
                APPROVED_COUNT_QUALIFICATION,
                amount,
            ));
        }

        if let Some(country) = self.country_code.as_deref().filter(|c| !c.is_empty()) {
            quals.push(QualificationRequirement::in_country(country));
        }

        quals
    }

    /// CreateHIT parameters for a task served from `localhost`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAmount`] when the reward is not a whole number of cents.
    pub fn to_params(&self, localhost: &str) -> Result<Params> {
        let mut params = Params::new();
        params.insert("Title".into(), json!(self.title));
        params.insert("Description".into(), json!(self.description));
        params.insert("Keywords".into(), json!(self.keywords));
        params.insert("Reward".into(), json!(money(self.reward)?));
        params.insert("AssignmentDurationInSeconds".into(), json!(self.duration));
        params.insert("AutoApprovalDelayInSeconds".into(), json!(self.auto_approve));
        params.insert("LifetimeInSeconds".into(), json!(self.lifetime));

        let quals = self.qualification_requirements();
        if !quals.is_empty() {
            params.insert("QualificationRequirements".into(), json!(quals));
        }

        params.insert(
            "Question".into(),
            Value::String(external_question(localhost, &self.page, self.frame_height)),
        );
        Ok(params)
    }
}

/// Formats a USD amount as a decimal string with two places.
///
/// Amounts are never rounded: negative, non-finite or sub-cent values fail
/// with [`Error::InvalidAmount`].
pub fn money(amount: f64) -> Result<String> {
    let cents = amount * 100.0;
    if !amount.is_finite() || amount < 0.0 || (cents - cents.round()).abs() > 1e-6 {
        return Err(Error::InvalidAmount(amount));
    }
    Ok(format!("{amount:.2}"))
}

/// ExternalQuestion document pointing workers at `{host}/{page}`.
pub fn external_question(host: &str, page: &str, height: u32) -> String {
    let url = format!("{}/{}", host.trim_end_matches('/'), page);
    format!(
        "<ExternalQuestion xmlns=\"{EXTERNAL_QUESTION_SCHEMA}\">\
         <ExternalURL>{}</ExternalURL>\
         <FrameHeight>{height}</FrameHeight>\
         </ExternalQuestion>",
        escape_xml(&url)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hit() -> NewHit {
        NewHit::new("Label images", "Draw boxes", "?id=7", 0.05, 3600, 86400)
    }

    #[test]
    fn defaults_follow_marketplace_conventions() {
        let hit = hit();
        assert_eq!(hit.auto_approve, 604_800);
        assert_eq!(hit.frame_height, 650);
        assert_eq!(hit.keywords, "");
        assert!(hit.qualification_requirements().is_empty());
    }

    #[test]
    fn qualifications_follow_fixed_order() {
        let hit = hit().country_code("US").min_approved_amount(100).min_approval_percent(95);
        let quals = hit.qualification_requirements();

        let ids: Vec<&str> = quals
            .iter()
            .map(|q| q.qualification_type_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                APPROVAL_PERCENT_QUALIFICATION,
                APPROVED_COUNT_QUALIFICATION,
                LOCALE_QUALIFICATION
            ]
        );
    }

    #[test]
    fn only_supplied_qualifications_are_included() {
        let quals = hit().min_approved_amount(50).qualification_requirements();
        assert_eq!(
            quals,
            vec![QualificationRequirement {
                qualification_type_id: APPROVED_COUNT_QUALIFICATION.to_string(),
                comparator: Comparator::GreaterThanOrEqualTo,
                integer_values: Some(vec![50]),
                locale_values: None,
            }]
        );

        let quals = hit().country_code("DE").qualification_requirements();
        assert_eq!(quals.len(), 1);
        assert_eq!(quals[0].comparator, Comparator::EqualTo);
    }

    #[test]
    fn zero_and_empty_filters_are_ignored() {
        let hit = hit()
            .min_approval_percent(0)
            .min_approved_amount(0)
            .country_code("");
        assert!(hit.qualification_requirements().is_empty());
        assert!(!hit.to_params("http://h").unwrap().contains_key("QualificationRequirements"));
    }

    #[test]
    fn qualification_serializes_with_marketplace_names() {
        let quals = hit().country_code("US").min_approval_percent(90).qualification_requirements();
        assert_eq!(
            json!(quals),
            json!([
                {
                    "QualificationTypeId": "000000000000000000L0",
                    "Comparator": "GreaterThanOrEqualTo",
                    "IntegerValues": [90]
                },
                {
                    "QualificationTypeId": "00000000000000000071",
                    "Comparator": "EqualTo",
                    "LocaleValues": [{"Country": "US"}]
                }
            ])
        );
    }

    #[test]
    fn external_question_points_at_page() {
        let xml = external_question("https://tasks.example.com/", "?id=7&v=2", 700);
        assert_eq!(
            xml,
            "<ExternalQuestion xmlns=\"http://mechanicalturk.amazonaws.com/AWSMechanicalTurkDataSchemas/2006-07-14/ExternalQuestion.xsd\">\
             <ExternalURL>https://tasks.example.com/?id=7&amp;v=2</ExternalURL>\
             <FrameHeight>700</FrameHeight>\
             </ExternalQuestion>"
        );
    }

    #[test]
    fn params_carry_formatted_reward() {
        let params = hit()
            .keywords("images, boxes")
            .to_params("https://tasks.example.com")
            .unwrap();
        assert_eq!(params["Title"], json!("Label images"));
        assert_eq!(params["Keywords"], json!("images, boxes"));
        assert_eq!(params["Reward"], json!("0.05"));
        assert_eq!(params["AssignmentDurationInSeconds"], json!(3600));
        assert_eq!(params["AutoApprovalDelayInSeconds"], json!(604_800));
        assert_eq!(params["LifetimeInSeconds"], json!(86400));
    }

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(1.0).unwrap(), "1.00");
        assert_eq!(money(0.5).unwrap(), "0.50");
        assert_eq!(money(0.05).unwrap(), "0.05");
        assert_eq!(money(19.99).unwrap(), "19.99");
        assert_eq!(money(0.0).unwrap(), "0.00");
    }

    #[test]
    fn money_rejects_sub_cent_amounts() {
        assert!(matches!(money(7.999), Err(Error::InvalidAmount(a)) if a == 7.999));
        assert!(matches!(money(0.004), Err(Error::InvalidAmount(_))));
        assert!(matches!(money(-1.0), Err(Error::InvalidAmount(_))));
        assert!(matches!(money(f64::NAN), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn sub_cent_reward_is_rejected() {
        let hit = NewHit::new("t", "d", "p", 0.055, 60, 60);
        assert!(matches!(
            hit.to_params("http://h"),
            Err(Error::InvalidAmount(a)) if a == 0.055
        ));
    }
}

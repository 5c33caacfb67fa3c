use serverlessrepo::{PublishAction, PublishResult};

pub(crate) const PUBLISH_SUCCEEDED: &str = "Publish Succeeded";
pub(crate) const PUBLISH_FAILED: &str = "Publish Failed";

pub(crate) fn publish_message(result: &PublishResult) -> String {
    let details = format!("{:#}", serde_json::Value::Object(result.details.clone()));

    if result.actions.contains(&PublishAction::CreateApplication) {
        format!("Created new application with the following metadata:\n{details}")
    } else {
        format!(
            "The following metadata of application \"{}\" has been updated:\n{details}",
            result.application_id
        )
    }
}

pub(crate) fn console_link(region: &str, application_id: &str) -> String {
    format!(
        "Click the link below to view your application in AWS console:\n\
         https://console.{}/serverlessrepo/home?region={region}#/published-applications/{}",
        console_host(region),
        application_id.replace('/', "~")
    )
}

fn console_host(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "amazonaws.cn"
    } else if region.starts_with("us-gov-") {
        "amazonaws-us-gov.com"
    } else {
        "aws.amazon.com"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const APPLICATION_ID: &str = "arn:aws:serverlessrepo:us-east-1:123456789012:applications/hello";

    fn publish_result(actions: Vec<PublishAction>) -> PublishResult {
        let mut details = serde_json::Map::new();
        details.insert(String::from("attr1"), serde_json::Value::from("value1"));

        PublishResult {
            application_id: String::from(APPLICATION_ID),
            details,
            actions,
        }
    }

    #[test]
    fn created_application_message() {
        assert_eq!(
            publish_message(&publish_result(vec![PublishAction::CreateApplication])),
            indoc! {r#"
                Created new application with the following metadata:
                {
                  "attr1": "value1"
                }"#}
        );
    }

    #[test]
    fn updated_application_message() {
        let expected = indoc! {r#"
            The following metadata of application "arn:aws:serverlessrepo:us-east-1:123456789012:applications/hello" has been updated:
            {
              "attr1": "value1"
            }"#};

        assert_eq!(
            publish_message(&publish_result(vec![PublishAction::UpdateApplication])),
            expected
        );
        assert_eq!(
            publish_message(&publish_result(vec![
                PublishAction::UpdateApplication,
                PublishAction::CreateApplicationVersion
            ])),
            expected
        );
    }

    #[test]
    fn message_without_details() {
        let result = PublishResult {
            details: serde_json::Map::new(),
            ..publish_result(vec![])
        };

        assert!(publish_message(&result).ends_with("has been updated:\n{}"));
    }

    #[test]
    fn link_replaces_slashes_in_application_id() {
        assert_eq!(
            console_link("us-east-1", APPLICATION_ID),
            "Click the link below to view your application in AWS console:\n\
             https://console.aws.amazon.com/serverlessrepo/home?region=us-east-1#/published-applications/arn:aws:serverlessrepo:us-east-1:123456789012:applications~hello"
        );
    }

    #[test]
    fn link_uses_partition_console_host() {
        assert!(console_link("cn-north-1", "arn:aws-cn:serverlessrepo:cn-north-1:1:applications/x")
            .contains("https://console.amazonaws.cn/serverlessrepo/home?region=cn-north-1#"));
        assert!(console_link("us-gov-west-1", "id")
            .contains("https://console.amazonaws-us-gov.com/serverlessrepo/home?region=us-gov-west-1#"));
    }
}

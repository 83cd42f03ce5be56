use url::form_urlencoded;

/// Link to Jira's issue navigator listing exactly the given incidents.
pub fn issue_list_link<S: AsRef<str>>(base_url: &str, project_key: &str, keys: &[S]) -> String {
    let keys = keys.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
    let jql = format!("project = {project_key} AND issuetype = Incident AND key in ({keys})");
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("jql", &jql)
        .finish();

    format!(
        "{}/jira/software/c/projects/{}/issues?{}",
        base_url.trim_end_matches('/'),
        project_key,
        query
    )
}

use crate::{CampdirDocument, CampdirValue};
use std::collections::HashMap;

/// Retrieves a field's value from a document using a dot-separated path.
///
/// This function allows accessing nested fields within a document's map
/// values. For example, given a document with a field `location` which is a
/// map containing a field `city`, you can retrieve the value of `city` using
/// the path `"location.city"`.
///
/// # Returns
/// Returns `Some(&CampdirValue)` if the field is found at the specified path,
/// otherwise `None`.
///
/// # Examples
/// ```rust
/// use campdir::{campdir_doc_get_field_by_path, CampdirDocument, CampdirValue};
///
/// let doc = CampdirDocument::new("bootcamp-1".to_string())
///     .with_field("location", CampdirValue::from_map([("city", "Boston".into())]));
///
/// let city = campdir_doc_get_field_by_path(&doc, "location.city");
/// assert_eq!(city.and_then(|v| v.as_str()), Some("Boston"));
/// assert!(campdir_doc_get_field_by_path(&doc, "location.state").is_none());
/// ```
pub fn campdir_doc_get_field_by_path<'d>(
    doc: &'d CampdirDocument,
    field_path: &str,
) -> Option<&'d CampdirValue> {
    let field_path: Vec<&str> = field_path.split('.').collect();
    campdir_doc_get_field_by_path_arr(&doc.fields, &field_path)
}

fn campdir_doc_get_field_by_path_arr<'d>(
    fields: &'d HashMap<String, CampdirValue>,
    field_path_arr: &[&str],
) -> Option<&'d CampdirValue> {
    field_path_arr.first().and_then(|field_name| {
        fields.get(*field_name).and_then(|field_value| {
            if field_path_arr.len() == 1 {
                Some(field_value)
            } else {
                match field_value {
                    CampdirValue::Map(ref nested) => {
                        campdir_doc_get_field_by_path_arr(nested, &field_path_arr[1..])
                    }
                    _ => None,
                }
            }
        })
    })
}

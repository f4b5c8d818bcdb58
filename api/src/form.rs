// the fields of a form at submit time
//
// this mirrors the browser's FormData semantics: entries keep the order they
// appear in the form and a name may appear more than once (checkbox groups,
// multi-selects), so this is a list of pairs rather than a map
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        FormPayload { fields: Vec::new() }
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    // first value recorded for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // build the multipart body handed to fetch()
    pub fn to_form_data(&self) -> Result<web_sys::FormData, wasm_bindgen::JsValue> {
        let data = web_sys::FormData::new()?;

        for (name, value) in self.iter() {
            data.append_with_str(name, value)?;
        }

        Ok(data)
    }
}

impl<K, V> FromIterator<(K, V)> for FormPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormPayload {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

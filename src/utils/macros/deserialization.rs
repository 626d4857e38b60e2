//! Case-insensitive deserialization for `{"type": ..., "value": ...}` tagged enums.

/// Implements `Deserialize` for a newtype-variant enum tagged as `{"type": ..., "value": ...}`,
/// matching the tag case-insensitively. Each variant must be constructible from a `String`
/// via `Into`.
#[macro_export]
macro_rules! impl_case_insensitive_enum {
	($enum_name:ident, { $($tag:expr => $variant:ident),* $(,)? }) => {
		impl<'de> ::serde::Deserialize<'de> for $enum_name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: ::serde::Deserializer<'de>,
			{
				#[derive(::serde::Deserialize)]
				struct Tagged {
					#[serde(rename = "type")]
					tag: String,
					value: String,
				}

				let tagged = <Tagged as ::serde::Deserialize>::deserialize(deserializer)?;
				match tagged.tag.to_lowercase().as_str() {
					$(
						$tag => Ok($enum_name::$variant(tagged.value.into())),
					)*
					_ => Err(<D::Error as ::serde::de::Error>::unknown_variant(
						&tagged.tag,
						&[$($tag),*],
					)),
				}
			}
		}
	};
}

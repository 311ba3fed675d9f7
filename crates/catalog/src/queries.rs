//! GraphQL documents sent to the catalog API.

const PRODUCT_FIELDS: &str = "
    id
    title
    description
    descriptionHtml
    updatedAt
    seo { description }
    featuredImage { url }
";

const COLLECTION_FIELDS: &str = "
    id
    title
    description
    descriptionHtml
    updatedAt
    seo { description }
    image { url }
";

pub fn products_page() -> String {
    format!(
        "query ProductsPage($first: Int!, $after: String) {{
            products(first: $first, after: $after) {{
                pageInfo {{ hasNextPage endCursor }}
                nodes {{ {PRODUCT_FIELDS} }}
            }}
        }}"
    )
}

pub fn collections_page() -> String {
    format!(
        "query CollectionsPage($first: Int!, $after: String) {{
            collections(first: $first, after: $after) {{
                pageInfo {{ hasNextPage endCursor }}
                nodes {{ {COLLECTION_FIELDS} }}
            }}
        }}"
    )
}

pub fn product_by_id() -> String {
    format!(
        "query Product($id: ID!) {{
            product(id: $id) {{ {PRODUCT_FIELDS} }}
        }}"
    )
}

pub fn collection_by_id() -> String {
    format!(
        "query Collection($id: ID!) {{
            collection(id: $id) {{ {COLLECTION_FIELDS} }}
        }}"
    )
}

pub fn product_update() -> String {
    format!(
        "mutation ProductUpdate($input: ProductInput!) {{
            productUpdate(input: $input) {{
                product {{ {PRODUCT_FIELDS} }}
                userErrors {{ field message }}
            }}
        }}"
    )
}

pub fn collection_update() -> String {
    format!(
        "mutation CollectionUpdate($input: CollectionInput!) {{
            collectionUpdate(input: $input) {{
                collection {{ {COLLECTION_FIELDS} }}
                userErrors {{ field message }}
            }}
        }}"
    )
}

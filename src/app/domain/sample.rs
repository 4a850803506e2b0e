/// Document shown on first launch, before anything has been saved.
pub const SAMPLE_MARKDOWN: &str = r#"# Welcome to Taildown!

Write Markdown here and get HTML styled with **Tailwind CSS** utility classes.

## Headings

### Smaller headings

Paragraphs pick up their own classes, and so do **bold** and *italic* runs.

![Placeholder image](https://placehold.co/200x200)

[Visit Example](https://www.example.com)

Tables work too:

| Element | Default classes |
| ------- | --------------- |
| h1      | text-3xl        |
| p       | mb-4            |

Lists:

- Item 1
- Item 2
  - Subitem 2.1
  - Subitem 2.2
- Item 3

1. First
2. Second

> Open the settings view to change the classes applied to each element, then check the HTML view to see the result.

Happy writing!
"#;

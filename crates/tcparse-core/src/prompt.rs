//! Prompt text that asks an assistant for test cases in a parseable shape

/// Instructions listing the three encodings the extractor understands
pub const GENERATION_PROMPT: &str = r#"Please write test cases using one of the following formats.

**1. JSON (preferred)**:
```json
{
  "name": "Test case name",
  "description": "What the test case checks",
  "priority": "HIGH|MEDIUM|LOW",
  "tags": ["tag1", "tag2"],
  "preCondition": "Precondition",
  "steps": [
    {
      "stepNumber": 1,
      "description": "Action to perform",
      "expectedResult": "Expected result"
    }
  ],
  "expectedResults": "Overall expected result"
}
```

**2. Markdown table**:
| Field | Value |
|------|------|
| **name** | Test case name |
| **description** | What the test case checks |
| **priority** | High, Medium, Low or P1, P2, P3 |
| **tags** | ["tag1", "tag2"] |
| **preCondition** | Precondition |
| **Step 1** | **Description**: First step <br>**Expected Result**: First expected result |
| **Step 2** | **Description**: Second step <br>**Expected Result**: Second expected result |
| **expectedResults** | Overall expected result |

**3. Markers**:
=== TESTCASE START ===
name: Test case name
description: What the test case checks
priority: High
tags: tag1, tag2
steps:
1. First step | First expected result
2. Second step | Second expected result
=== TESTCASE END ===
"#;
